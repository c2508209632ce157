use foundation::bounds::Aabb2;
use foundation::math::{GeoPoint, MEAN_EARTH_RADIUS_M, unwrap_ring};

/// Planar area below this fraction of the squared ring extent counts as zero width.
const ZERO_WIDTH_EPS: f64 = 1.0e-12;

/// Usable vertices of a ring: non-finite vertices, consecutive repeats and the
/// closing duplicate are dropped. Longitudes are unwrapped relative to the
/// first vertex so rings crossing the antimeridian stay continuous.
pub fn ring_vertices(ring: &[GeoPoint]) -> Vec<GeoPoint> {
    let mut out: Vec<GeoPoint> = Vec::with_capacity(ring.len());
    for p in ring.iter().filter(|p| p.is_finite()) {
        if out.last() != Some(p) {
            out.push(*p);
        }
    }
    while out.len() >= 2 && out.first() == out.last() {
        out.pop();
    }

    let Some(first) = out.first() else {
        return out;
    };
    unwrap_ring(&out, first.lon_deg)
}

/// True when the ring cannot enclose any area: fewer than 3 usable vertices,
/// or all of them collinear.
pub fn is_degenerate_ring(ring: &[GeoPoint]) -> bool {
    let vertices = ring_vertices(ring);
    vertices_are_degenerate(&vertices)
}

/// Unsigned shoelace area in the ring's own coordinate units.
///
/// Suitable for projected coordinates; for lon/lat input this is square degrees.
pub fn planar_ring_area(ring: &[GeoPoint]) -> f64 {
    let vertices = ring_vertices(ring);
    if vertices_are_degenerate(&vertices) {
        return 0.0;
    }
    (twice_signed_planar_area(&vertices) / 2.0).abs()
}

/// Unsigned area in square meters of a lon/lat ring on the mean-radius sphere.
///
/// Uses the spherical-excess line integral
/// `Σ (λ₂ − λ₁)(2 + sin φ₁ + sin φ₂) · R² / 2`. The sign of the sum depends on
/// winding and is discarded. Degenerate rings report exactly `0.0`.
pub fn ring_area(ring: &[GeoPoint]) -> f64 {
    let vertices = ring_vertices(ring);
    if vertices_are_degenerate(&vertices) {
        return 0.0;
    }

    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        sum += (b.lon_rad() - a.lon_rad()) * (2.0 + a.lat_rad().sin() + b.lat_rad().sin());
    }

    (sum * MEAN_EARTH_RADIUS_M * MEAN_EARTH_RADIUS_M / 2.0).abs()
}

pub(crate) fn vertices_are_degenerate(vertices: &[GeoPoint]) -> bool {
    if vertices.len() < 3 {
        return true;
    }
    let Some(bounds) = Aabb2::from_points(vertices) else {
        return true;
    };
    let extent = bounds.extent();
    if extent <= 0.0 {
        return true;
    }
    twice_signed_planar_area(vertices).abs() <= ZERO_WIDTH_EPS * extent * extent
}

/// Shoelace sum relative to the first vertex to limit cancellation.
pub(crate) fn twice_signed_planar_area(vertices: &[GeoPoint]) -> f64 {
    let Some(origin) = vertices.first() else {
        return 0.0;
    };
    let n = vertices.len();
    let mut sum = 0.0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        let (ax, ay) = (a.lon_deg - origin.lon_deg, a.lat_deg - origin.lat_deg);
        let (bx, by) = (b.lon_deg - origin.lon_deg, b.lat_deg - origin.lat_deg);
        sum += ax * by - bx * ay;
    }
    sum
}
