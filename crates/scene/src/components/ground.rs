use serde::Serialize;

use super::style::SurfaceStyle;

/// Flat 2D polygon drawn under everything else (the parcel).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroundRecord {
    pub id: &'static str,
    /// `[lon, lat]` vertices exactly as supplied.
    pub polygon: Vec<[f64; 2]>,
    pub style: SurfaceStyle,
}
