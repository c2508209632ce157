use foundation::math::unwrap_longitude;

use crate::SceneDescription;

/// Pointer event reported by the rendering boundary.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PointerEvent {
    /// Screen position in pixels.
    pub x: f64,
    pub y: f64,
    /// Index into the scene's marker list, if the pointer is over a marker.
    pub picked_marker: Option<usize>,
    /// Picked `[lon, lat]`, in whichever world copy the renderer reported.
    pub coordinate: [f64; 2],
    /// Longitude of the current viewport center.
    pub viewport_longitude: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Tooltip {
    pub x: f64,
    pub y: f64,
    /// Picked coordinate, unwrapped against the viewport longitude.
    pub coordinate: [f64; 2],
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TooltipState {
    Hidden,
    Visible(Tooltip),
}

impl TooltipState {
    pub fn is_visible(&self) -> bool {
        matches!(self, TooltipState::Visible(_))
    }
}

/// Outcome of a click: the continuous picked coordinate, and the tooltip is dismissed.
#[derive(Debug, Clone, PartialEq)]
pub struct ClickOutcome {
    pub coordinate: [f64; 2],
    pub tooltip: TooltipState,
}

/// Tooltip for a hover event.
///
/// Contract:
/// - A visible tooltip is produced only when the event picks an existing marker.
/// - Its coordinate longitude is within 180° of the viewport longitude.
/// - Content is altitude and heading with two decimals.
pub fn hover(scene: &SceneDescription, event: &PointerEvent) -> TooltipState {
    let Some(marker) = event.picked_marker.and_then(|i| scene.marker(i)) else {
        return TooltipState::Hidden;
    };

    TooltipState::Visible(Tooltip {
        x: event.x,
        y: event.y,
        coordinate: continuous_coordinate(event),
        lines: vec![
            format!("Altitude: {:.2}m", marker.altitude_m),
            format!("Heading: {:.2}°", marker.bearing_deg),
        ],
    })
}

pub fn click(event: &PointerEvent) -> ClickOutcome {
    ClickOutcome {
        coordinate: continuous_coordinate(event),
        tooltip: TooltipState::Hidden,
    }
}

fn continuous_coordinate(event: &PointerEvent) -> [f64; 2] {
    [
        unwrap_longitude(event.viewport_longitude, event.coordinate[0]),
        event.coordinate[1],
    ]
}
