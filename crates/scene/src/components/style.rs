use serde::{Deserialize, Serialize};

/// 8-bit RGBA color as consumed by the rendering boundary.
pub type Rgba = [u8; 4];

#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurfaceStyle {
    pub fill_color: Rgba,
    pub line_color: Rgba,
    pub line_width: f64,
    pub opacity: f64,
    pub wireframe: bool,
}

impl SurfaceStyle {
    pub const fn flat(fill_color: Rgba, line_color: Rgba, line_width: f64) -> Self {
        Self {
            fill_color,
            line_color,
            line_width,
            opacity: 1.0,
            wireframe: false,
        }
    }

    pub const fn with_wireframe(mut self) -> Self {
        self.wireframe = true;
        self
    }
}
