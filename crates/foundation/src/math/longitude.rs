//! Antimeridian handling for longitudes in degrees.
//!
//! Renderers pick coordinates in whatever world copy the pointer happened to
//! be over. Everything that feeds screen placement goes through
//! [`unwrap_longitude`] first so the result stays within half a turn of the
//! viewport center.

use super::GeoPoint;

/// Shift `lon_deg` by whole turns until it is within 180° of `reference_deg`.
///
/// Postconditions for finite inputs:
/// - `|reference_deg - result| <= 180`
/// - `result ≡ lon_deg (mod 360)`
///
/// Non-finite inputs are returned unchanged.
pub fn unwrap_longitude(reference_deg: f64, lon_deg: f64) -> f64 {
    if !reference_deg.is_finite() || !lon_deg.is_finite() {
        return lon_deg;
    }

    let mut out = lon_deg;
    let delta = reference_deg - out;
    if delta.abs() > 540.0 {
        // Collapse far-away copies in one step; the loop below then runs at most twice.
        out += delta - delta.rem_euclid(360.0);
    }
    while (reference_deg - out).abs() > 180.0 {
        out += if reference_deg > out { 360.0 } else { -360.0 };
    }
    out
}

/// Canonical longitude in `[-180, 180)`.
pub fn wrap_longitude(lon_deg: f64) -> f64 {
    if !lon_deg.is_finite() {
        return lon_deg;
    }
    (lon_deg + 180.0).rem_euclid(360.0) - 180.0
}

/// Unwrap every vertex relative to its predecessor, starting from `reference_deg`.
///
/// A ring that crosses the antimeridian comes out with continuous longitudes
/// (possibly outside `[-180, 180]`); latitudes are untouched.
pub fn unwrap_ring(ring: &[GeoPoint], reference_deg: f64) -> Vec<GeoPoint> {
    let mut out = Vec::with_capacity(ring.len());
    let mut prev = reference_deg;
    for p in ring {
        let lon = unwrap_longitude(prev, p.lon_deg);
        out.push(GeoPoint::new(lon, p.lat_deg));
        if lon.is_finite() {
            prev = lon;
        }
    }
    out
}
