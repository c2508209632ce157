use serde::Serialize;

use super::style::Rgba;

#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IconMapping {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub mask: bool,
}

/// How every marker of a layer is drawn.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerStyle {
    pub icon_atlas: String,
    pub icon_mapping: IconMapping,
    pub size: f64,
    pub size_scale: f64,
    pub billboard: bool,
    pub pickable: bool,
    /// Optional 3D model drawn at each marker with the marker's orientation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    pub model_color: Rgba,
}

/// One placed observation marker.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerRecord {
    /// `[lon, lat, altitude_m]`.
    pub position: [f64; 3],
    /// `[pitch, yaw, roll]` in degrees, passed through to the renderer.
    pub orientation: [f64; 3],
    pub icon: &'static str,
    pub bearing_deg: f64,
    pub altitude_m: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkerLayerRecord {
    pub id: &'static str,
    pub style: MarkerStyle,
    pub markers: Vec<MarkerRecord>,
}
