use foundation::math::GeoPoint;
use scene::components::{GroundRecord, SurfaceStyle};

use crate::assemble::{AssembleError, RingRole, check_ring};
use crate::layer::{Layer, LayerId};
use crate::symbology::GROUND_STYLE;

/// Flat parcel polygon at ground level.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GroundLayer {
    pub style: SurfaceStyle,
}

impl Default for GroundLayer {
    fn default() -> Self {
        Self {
            style: GROUND_STYLE,
        }
    }
}

impl GroundLayer {
    pub fn build(&self, parcel: &[GeoPoint]) -> Result<GroundRecord, AssembleError> {
        check_ring(parcel, RingRole::Parcel)?;
        Ok(GroundRecord {
            id: self.id().as_str(),
            polygon: parcel.iter().map(|p| p.as_array()).collect(),
            style: self.style,
        })
    }
}

impl Layer for GroundLayer {
    fn id(&self) -> LayerId {
        LayerId::GROUND
    }
}
