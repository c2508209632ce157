use formats::ObservationPoint;
use scene::components::{MarkerLayerRecord, MarkerRecord, MarkerStyle};

use crate::layer::{Layer, LayerId};
use crate::symbology::{MARKER_ICON, default_marker_style};

/// One oriented marker per observation point.
#[derive(Debug, Clone, PartialEq)]
pub struct MarkerLayer {
    pub style: MarkerStyle,
}

impl Default for MarkerLayer {
    fn default() -> Self {
        Self {
            style: default_marker_style(),
        }
    }
}

impl MarkerLayer {
    pub fn build(&self, observations: &[ObservationPoint]) -> MarkerLayerRecord {
        MarkerLayerRecord {
            id: self.id().as_str(),
            style: self.style.clone(),
            markers: observations.iter().map(marker_for).collect(),
        }
    }
}

impl Layer for MarkerLayer {
    fn id(&self) -> LayerId {
        LayerId::MARKERS
    }
}

/// `[pitch, yaw, roll] = [0, -bearing, 90]`: the model stands upright and turns
/// against the compass heading.
pub fn marker_orientation(bearing_deg: f64) -> [f64; 3] {
    // 0 - b rather than -b so a zero bearing stays +0.
    [0.0, 0.0 - bearing_deg, 90.0]
}

fn marker_for(point: &ObservationPoint) -> MarkerRecord {
    MarkerRecord {
        position: point.position.lifted(point.altitude_m),
        orientation: marker_orientation(point.bearing_deg),
        icon: MARKER_ICON,
        bearing_deg: point.bearing_deg,
        altitude_m: point.altitude_m,
    }
}
