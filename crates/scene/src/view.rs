use serde::{Deserialize, Serialize};

/// Zoom used when framing a freshly loaded site.
pub const SITE_ZOOM: f64 = 18.0;

/// Camera state handed to the renderer alongside the scene.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ViewState {
    pub latitude: f64,
    pub longitude: f64,
    pub zoom: f64,
    pub pitch: f64,
    pub bearing: f64,
    pub max_pitch: f64,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            latitude: 46.203589,
            longitude: 6.1369,
            zoom: 4.0,
            pitch: 45.0,
            bearing: 0.0,
            max_pitch: 89.0,
        }
    }
}

impl ViewState {
    /// Same pitch and bearing, looking at `[lon, lat]` at site zoom.
    pub fn framing(self, center: [f64; 2]) -> Self {
        Self {
            longitude: center[0],
            latitude: center[1],
            zoom: SITE_ZOOM,
            ..self
        }
    }
}
