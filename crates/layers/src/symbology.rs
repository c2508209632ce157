use scene::components::{IconMapping, MarkerStyle, Rgba, SurfaceStyle};

pub const OUTLINE_COLOR: Rgba = [0, 0, 0, 255];

/// Parcel fill: pale green, thin black outline.
pub const GROUND_STYLE: SurfaceStyle = SurfaceStyle::flat([183, 244, 216, 255], OUTLINE_COLOR, 0.3);

/// Building fill: amber, outlined with a wireframe.
pub const EXTRUSION_STYLE: SurfaceStyle =
    SurfaceStyle::flat([249, 180, 45, 255], OUTLINE_COLOR, 1.0).with_wireframe();

pub const MARKER_ICON: &str = "marker";
pub const MARKER_ICON_ATLAS: &str =
    "https://raw.githubusercontent.com/visgl/deck.gl-data/master/website/icon-atlas.png";
pub const MARKER_MODEL: &str = "./cam.gltf";
pub const MARKER_MODEL_COLOR: Rgba = [203, 24, 226, 255];

/// Icon sprite occupying the whole 128×128 atlas, tinted through its mask.
pub const MARKER_ICON_MAPPING: IconMapping = IconMapping {
    x: 0,
    y: 0,
    width: 128,
    height: 128,
    mask: true,
};

pub fn default_marker_style() -> MarkerStyle {
    MarkerStyle {
        icon_atlas: MARKER_ICON_ATLAS.to_string(),
        icon_mapping: MARKER_ICON_MAPPING,
        size: 5.0,
        size_scale: 8.0,
        billboard: true,
        pickable: true,
        model: Some(MARKER_MODEL.to_string()),
        model_color: MARKER_MODEL_COLOR,
    }
}
