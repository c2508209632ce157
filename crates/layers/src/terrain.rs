use scene::components::TerrainDrape;

use crate::layer::{Layer, LayerId};

/// Passes the configured terrain drape through to the scene untouched.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TerrainLayer {
    pub drape: TerrainDrape,
}

impl TerrainLayer {
    pub fn new(drape: TerrainDrape) -> Self {
        Self { drape }
    }

    pub fn build(&self) -> TerrainDrape {
        self.drape.clone()
    }
}

impl Layer for TerrainLayer {
    fn id(&self) -> LayerId {
        LayerId::TERRAIN
    }
}
