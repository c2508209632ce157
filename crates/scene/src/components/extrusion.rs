use serde::Serialize;

use super::style::SurfaceStyle;

/// Prism built by lifting a contour to its base elevation and extruding it upward.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtrusionRecord {
    pub id: &'static str,
    /// `[lon, lat, base_elevation_m]` per vertex.
    pub contour: Vec<[f64; 3]>,
    /// Extrusion distance above the contour, in meters.
    pub elevation_m: f64,
    pub style: SurfaceStyle,
}

impl ExtrusionRecord {
    /// Absolute elevation of the prism's roof.
    pub fn top_elevation_m(&self) -> Option<f64> {
        self.contour.first().map(|v| v[2] + self.elevation_m)
    }
}
