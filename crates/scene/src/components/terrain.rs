use serde::{Deserialize, Serialize};

pub const DEFAULT_ELEVATION_DATA: &str =
    "https://tile.buildingshistory.co.uk/data/su_/{z}/{x}/{y}.png";

/// Terrain-RGB decode scalars for the renderer:
/// `elevation = r * r_scaler + g * g_scaler + b * b_scaler + offset`.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElevationDecoder {
    pub r_scaler: f64,
    pub g_scaler: f64,
    pub b_scaler: f64,
    pub offset: f64,
}

impl Default for ElevationDecoder {
    fn default() -> Self {
        Self {
            r_scaler: 6553.6,
            g_scaler: 25.6,
            b_scaler: 0.1,
            offset: -10000.0,
        }
    }
}

/// Terrain drape configuration handed to the renderer unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TerrainDrape {
    /// Tile URL template for elevation imagery.
    pub elevation_data: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub texture: Option<String>,
    pub elevation_decoder: ElevationDecoder,
    pub min_zoom: u8,
    pub max_zoom: u8,
    pub strategy: String,
    pub wireframe: bool,
    pub color: [u8; 3],
}

impl Default for TerrainDrape {
    fn default() -> Self {
        Self {
            elevation_data: DEFAULT_ELEVATION_DATA.to_string(),
            texture: None,
            elevation_decoder: ElevationDecoder::default(),
            min_zoom: 0,
            max_zoom: 23,
            strategy: "no-overlap".to_string(),
            wireframe: false,
            color: [255, 255, 255],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{ElevationDecoder, TerrainDrape};

    #[test]
    fn partial_config_keeps_defaults() {
        let drape: TerrainDrape =
            serde_json::from_str(r#"{ "maxZoom": 18, "texture": "https://example.test/{z}/{x}/{y}.jpg" }"#)
                .unwrap();
        assert_eq!(drape.max_zoom, 18);
        assert_eq!(drape.min_zoom, 0);
        assert_eq!(drape.strategy, "no-overlap");
        assert_eq!(drape.elevation_decoder, ElevationDecoder::default());
        assert!(drape.texture.is_some());
    }
}
