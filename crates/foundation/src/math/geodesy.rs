/// WGS84 semi-major axis (meters).
pub const WGS84_A: f64 = 6_378_137.0;
/// WGS84 flattening.
pub const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// WGS84 semi-minor axis (meters).
pub const WGS84_B: f64 = WGS84_A * (1.0 - WGS84_F);
/// IUGG mean Earth radius (meters), `(2a + b) / 3`.
pub const MEAN_EARTH_RADIUS_M: f64 = 6_371_008.8;

/// Geographic position in degrees, `[longitude, latitude]` order as in GeoJSON.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPoint {
    pub lon_deg: f64,
    pub lat_deg: f64,
}

impl GeoPoint {
    pub fn new(lon_deg: f64, lat_deg: f64) -> Self {
        Self { lon_deg, lat_deg }
    }

    pub fn lon_rad(self) -> f64 {
        self.lon_deg.to_radians()
    }

    pub fn lat_rad(self) -> f64 {
        self.lat_deg.to_radians()
    }

    pub fn is_finite(self) -> bool {
        self.lon_deg.is_finite() && self.lat_deg.is_finite()
    }

    pub fn as_array(self) -> [f64; 2] {
        [self.lon_deg, self.lat_deg]
    }

    /// Same point with a third ordinate appended.
    pub fn lifted(self, elevation_m: f64) -> [f64; 3] {
        [self.lon_deg, self.lat_deg, elevation_m]
    }
}

impl From<[f64; 2]> for GeoPoint {
    fn from(v: [f64; 2]) -> Self {
        Self::new(v[0], v[1])
    }
}
