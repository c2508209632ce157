use serde::Serialize;

use crate::components::{
    ExtrusionRecord, GroundRecord, MarkerLayerRecord, MarkerRecord, TerrainDrape,
};

/// Everything the rendering boundary needs to draw one site.
///
/// Built in one go and never patched; a recompute produces a new value.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescription {
    pub ground: GroundRecord,
    pub extrusion: ExtrusionRecord,
    pub terrain: TerrainDrape,
    pub markers: MarkerLayerRecord,
}

impl SceneDescription {
    pub fn marker(&self, index: usize) -> Option<&MarkerRecord> {
        self.markers.markers.get(index)
    }

    /// Layer ids in draw order.
    pub fn layer_ids(&self) -> [&'static str; 4] {
        [
            TERRAIN_LAYER_ID,
            self.ground.id,
            self.extrusion.id,
            self.markers.id,
        ]
    }
}

pub const TERRAIN_LAYER_ID: &str = "terrain";
