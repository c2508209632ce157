/// Stable identifier the rendering boundary keys its layers by.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LayerId(pub &'static str);

impl LayerId {
    pub const GROUND: LayerId = LayerId("geojson-ground-layer");
    pub const EXTRUSION: LayerId = LayerId("geojson-storey-building");
    pub const MARKERS: LayerId = LayerId("exif-icon-layer");
    pub const TERRAIN: LayerId = LayerId(scene::TERRAIN_LAYER_ID);

    pub fn as_str(self) -> &'static str {
        self.0
    }
}

pub trait Layer {
    fn id(&self) -> LayerId;
}
