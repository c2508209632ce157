use foundation::math::GeoPoint;
use scene::components::{ExtrusionRecord, SurfaceStyle};

use crate::assemble::{AssembleError, RingRole, check_ring};
use crate::layer::{Layer, LayerId};
use crate::symbology::EXTRUSION_STYLE;

/// Building prism: the footprint lifted to its base elevation, extruded by the height.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ExtrusionLayer {
    pub style: SurfaceStyle,
}

impl Default for ExtrusionLayer {
    fn default() -> Self {
        Self {
            style: EXTRUSION_STYLE,
        }
    }
}

impl ExtrusionLayer {
    pub fn build(
        &self,
        footprint: &[GeoPoint],
        base_elevation_m: f64,
        height_m: f64,
    ) -> Result<ExtrusionRecord, AssembleError> {
        check_ring(footprint, RingRole::Footprint)?;
        Ok(ExtrusionRecord {
            id: self.id().as_str(),
            contour: footprint.iter().map(|p| p.lifted(base_elevation_m)).collect(),
            elevation_m: height_m,
            style: self.style,
        })
    }
}

impl Layer for ExtrusionLayer {
    fn id(&self) -> LayerId {
        LayerId::EXTRUSION
    }
}
