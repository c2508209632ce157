use compute::is_degenerate_ring;
use formats::ObservationPoint;
use foundation::math::GeoPoint;
use scene::SceneDescription;
use scene::components::TerrainDrape;

use crate::extrusion::ExtrusionLayer;
use crate::ground::GroundLayer;
use crate::markers::MarkerLayer;
use crate::terrain::TerrainLayer;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RingRole {
    Parcel,
    Footprint,
}

impl std::fmt::Display for RingRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RingRole::Parcel => write!(f, "parcel"),
            RingRole::Footprint => write!(f, "footprint"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum AssembleError {
    DegenerateGeometry { ring: RingRole, vertices: usize },
}

impl std::fmt::Display for AssembleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssembleError::DegenerateGeometry { ring, vertices } => write!(
                f,
                "degenerate {ring} ring ({vertices} vertices): needs at least 3 distinct, non-collinear vertices"
            ),
        }
    }
}

impl std::error::Error for AssembleError {}

pub(crate) fn check_ring(ring: &[GeoPoint], role: RingRole) -> Result<(), AssembleError> {
    if is_degenerate_ring(ring) {
        return Err(AssembleError::DegenerateGeometry {
            ring: role,
            vertices: ring.len(),
        });
    }
    Ok(())
}

/// The four layer builders that make up a site scene.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SceneAssembler {
    pub ground: GroundLayer,
    pub extrusion: ExtrusionLayer,
    pub markers: MarkerLayer,
    pub terrain: TerrainLayer,
}

impl SceneAssembler {
    pub fn new(terrain: TerrainDrape) -> Self {
        Self {
            terrain: TerrainLayer::new(terrain),
            ..Self::default()
        }
    }

    /// Build a fresh scene. Inputs are only read; a failed build yields no scene at all.
    pub fn assemble(
        &self,
        parcel: &[GeoPoint],
        footprint: &[GeoPoint],
        base_elevation_m: f64,
        height_m: f64,
        observations: &[ObservationPoint],
    ) -> Result<SceneDescription, AssembleError> {
        let ground = self.ground.build(parcel)?;
        let extrusion = self.extrusion.build(footprint, base_elevation_m, height_m)?;

        Ok(SceneDescription {
            ground,
            extrusion,
            terrain: self.terrain.build(),
            markers: self.markers.build(observations),
        })
    }
}

/// Assemble a scene with the default symbology.
pub fn assemble(
    parcel: &[GeoPoint],
    footprint: &[GeoPoint],
    base_elevation_m: f64,
    height_m: f64,
    observations: &[ObservationPoint],
    terrain: &TerrainDrape,
) -> Result<SceneDescription, AssembleError> {
    SceneAssembler::new(terrain.clone()).assemble(
        parcel,
        footprint,
        base_elevation_m,
        height_m,
        observations,
    )
}

#[cfg(test)]
mod tests {
    use super::{AssembleError, RingRole, assemble};
    use crate::symbology::{EXTRUSION_STYLE, GROUND_STYLE};
    use formats::ObservationPoint;
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;
    use scene::components::TerrainDrape;

    fn ring(coords: &[(f64, f64)]) -> Vec<GeoPoint> {
        coords.iter().map(|&(x, y)| GeoPoint::new(x, y)).collect()
    }

    fn parcel() -> Vec<GeoPoint> {
        ring(&[(0.0, 0.0), (0.002, 0.0), (0.002, 0.002), (0.0, 0.002), (0.0, 0.0)])
    }

    fn footprint() -> Vec<GeoPoint> {
        ring(&[(0.0005, 0.0005), (0.0015, 0.0005), (0.001, 0.0015), (0.0005, 0.0005)])
    }

    fn cameras() -> Vec<ObservationPoint> {
        vec![
            ObservationPoint {
                position: GeoPoint::new(0.0001, 0.0001),
                bearing_deg: 45.0,
                altitude_m: 12.0,
            },
            ObservationPoint {
                position: GeoPoint::new(0.0019, 0.0019),
                bearing_deg: 0.0,
                altitude_m: 9.5,
            },
        ]
    }

    #[test]
    fn builds_all_four_records() {
        let terrain = TerrainDrape::default();
        let scene = assemble(&parcel(), &footprint(), 31.2, 12.5, &cameras(), &terrain).unwrap();

        assert_eq!(scene.ground.polygon.len(), 5);
        assert_eq!(scene.ground.polygon[1], [0.002, 0.0]);
        assert_eq!(scene.ground.style, GROUND_STYLE);

        assert_eq!(scene.extrusion.contour[0], [0.0005, 0.0005, 31.2]);
        assert!(scene.extrusion.contour.iter().all(|v| v[2] == 31.2));
        assert_eq!(scene.extrusion.elevation_m, 12.5);
        assert_eq!(scene.extrusion.top_elevation_m(), Some(31.2 + 12.5));
        assert_eq!(scene.extrusion.style, EXTRUSION_STYLE);

        assert_eq!(scene.terrain, terrain);
        assert_eq!(
            scene.layer_ids(),
            [
                "terrain",
                "geojson-ground-layer",
                "geojson-storey-building",
                "exif-icon-layer"
            ]
        );
    }

    #[test]
    fn markers_follow_observations_one_to_one() {
        let scene = assemble(
            &parcel(),
            &footprint(),
            0.0,
            30.0,
            &cameras(),
            &TerrainDrape::default(),
        )
        .unwrap();

        assert_eq!(scene.markers.markers.len(), 2);
        let first = &scene.markers.markers[0];
        assert_eq!(first.position, [0.0001, 0.0001, 12.0]);
        assert_eq!(first.orientation, [0.0, -45.0, 90.0]);
        assert_eq!(first.icon, "marker");
        assert_eq!(first.bearing_deg, 45.0);
        let second = &scene.markers.markers[1];
        assert_eq!(second.orientation, [0.0, 0.0, 90.0]);
        assert!(second.orientation[1].is_sign_positive());
    }

    #[test]
    fn degenerate_rings_are_rejected() {
        let terrain = TerrainDrape::default();
        let two_points = ring(&[(0.0, 0.0), (1.0, 1.0)]);
        let collinear = ring(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0), (0.0, 0.0)]);

        assert_eq!(
            assemble(&parcel(), &two_points, 0.0, 10.0, &[], &terrain),
            Err(AssembleError::DegenerateGeometry {
                ring: RingRole::Footprint,
                vertices: 2
            })
        );
        assert!(matches!(
            assemble(&collinear, &footprint(), 0.0, 10.0, &[], &terrain),
            Err(AssembleError::DegenerateGeometry {
                ring: RingRole::Parcel,
                ..
            })
        ));
    }

    #[test]
    fn inputs_are_left_untouched() {
        let parcel = parcel();
        let footprint = footprint();
        let cameras = cameras();
        let before = (parcel.clone(), footprint.clone(), cameras.clone());

        let a = assemble(&parcel, &footprint, 5.0, 20.0, &cameras, &TerrainDrape::default());
        let b = assemble(&parcel, &footprint, 5.0, 20.0, &cameras, &TerrainDrape::default());

        assert_eq!(before, (parcel, footprint, cameras));
        assert_eq!(a, b);
    }

    #[test]
    fn scene_serializes_for_the_renderer() {
        let scene = assemble(
            &parcel(),
            &footprint(),
            1.0,
            2.0,
            &cameras(),
            &TerrainDrape::default(),
        )
        .unwrap();
        let json = serde_json::to_value(&scene).unwrap();
        assert_eq!(json["ground"]["id"], "geojson-ground-layer");
        assert_eq!(json["extrusion"]["style"]["fillColor"][0], 249);
        assert_eq!(json["markers"]["style"]["sizeScale"], 8.0);
        assert_eq!(json["terrain"]["strategy"], "no-overlap");
    }
}
