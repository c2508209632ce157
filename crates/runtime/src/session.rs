use std::sync::Arc;

use compute::{ParameterError, SiteMetrics, ZoningParameters, site_metrics};
use formats::{
    DEFAULT_DATASET_FILE_NAME, DatasetError, DatasetExport, ObservationError, ObservationPoint,
    SiteDataset, Upload, UploadError, builtin_observations, check_file_type,
};
use layers::{AssembleError, SceneAssembler};
use scene::{ClickOutcome, PointerEvent, SceneDescription, TooltipState, ViewState};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::config::{ResetPolicy, SessionConfig};
use crate::event_bus::{EventBus, SessionEvent};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum SessionState {
    Idle,
    Loading,
    Ready,
    Error,
}

#[derive(Debug)]
pub enum SessionError {
    Parse(DatasetError),
    Observations(ObservationError),
    InvalidParameter(ParameterError),
    DegenerateGeometry(AssembleError),
    UnsupportedFileType(UploadError),
    Export(serde_json::Error),
    NothingLoaded,
}

impl std::fmt::Display for SessionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SessionError::Parse(e) => write!(f, "{e}"),
            SessionError::Observations(e) => write!(f, "{e}"),
            SessionError::InvalidParameter(e) => write!(f, "invalid parameter: {e}"),
            SessionError::DegenerateGeometry(e) => write!(f, "{e}"),
            SessionError::UnsupportedFileType(e) => write!(f, "{e}"),
            SessionError::Export(e) => write!(f, "export failed: {e}"),
            SessionError::NothingLoaded => write!(f, "no dataset loaded"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SessionError::Parse(e) => Some(e),
            SessionError::Observations(e) => Some(e),
            SessionError::InvalidParameter(e) => Some(e),
            SessionError::DegenerateGeometry(e) => Some(e),
            SessionError::UnsupportedFileType(e) => Some(e),
            SessionError::Export(e) => Some(e),
            SessionError::NothingLoaded => None,
        }
    }
}

impl From<DatasetError> for SessionError {
    fn from(e: DatasetError) -> Self {
        SessionError::Parse(e)
    }
}

impl From<ObservationError> for SessionError {
    fn from(e: ObservationError) -> Self {
        SessionError::Observations(e)
    }
}

impl From<ParameterError> for SessionError {
    fn from(e: ParameterError) -> Self {
        SessionError::InvalidParameter(e)
    }
}

impl From<AssembleError> for SessionError {
    fn from(e: AssembleError) -> Self {
        SessionError::DegenerateGeometry(e)
    }
}

impl From<UploadError> for SessionError {
    fn from(e: UploadError) -> Self {
        SessionError::UnsupportedFileType(e)
    }
}

/// Everything derived from one (dataset, parameters, observations) triple.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteSnapshot {
    pub generation: u64,
    pub file_name: String,
    #[serde(skip)]
    pub dataset: Arc<SiteDataset>,
    pub parameters: ZoningParameters,
    pub metrics: SiteMetrics,
    pub scene: SceneDescription,
    pub view: ViewState,
}

/// Site session state machine.
///
/// Contract:
/// - At most one snapshot is current, and it is replaced as a whole.
/// - A failed action never touches the current snapshot or parameters.
/// - Every transition, publication and failure lands on the event bus.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    assembler: SceneAssembler,
    state: SessionState,
    parameters: ZoningParameters,
    observations: Vec<ObservationPoint>,
    custom_observations: bool,
    current: Option<Arc<SiteSnapshot>>,
    generation: u64,
    events: EventBus,
}

impl Default for Session {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl Session {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            assembler: SceneAssembler::new(config.terrain.clone()),
            parameters: config.default_parameters,
            config,
            state: SessionState::Idle,
            observations: Vec::new(),
            custom_observations: false,
            current: None,
            generation: 0,
            events: EventBus::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn parameters(&self) -> ZoningParameters {
        self.parameters
    }

    pub fn snapshot(&self) -> Option<Arc<SiteSnapshot>> {
        self.current.clone()
    }

    pub fn events(&self) -> &[SessionEvent] {
        self.events.events()
    }

    pub fn drain_events(&mut self) -> Vec<SessionEvent> {
        self.events.drain()
    }

    /// Load the built-in sample site, with its camera positions unless
    /// observation points were set explicitly.
    pub fn load_default(&mut self) -> Result<Arc<SiteSnapshot>, SessionError> {
        self.transition(SessionState::Loading);
        let loaded = SiteDataset::builtin()
            .map_err(SessionError::from)
            .and_then(|ds| {
                let cameras = if self.custom_observations {
                    None
                } else {
                    Some(builtin_observations()?)
                };
                Ok((ds, cameras))
            });

        match loaded {
            Ok((dataset, cameras)) => {
                self.install(dataset, DEFAULT_DATASET_FILE_NAME.to_string(), cameras)
            }
            Err(e) => Err(self.fail(e, SessionState::Error)),
        }
    }

    /// Parse raw GeoJSON text and make it the current site.
    pub fn load_from_source(
        &mut self,
        raw: &str,
        file_name: impl Into<String>,
    ) -> Result<Arc<SiteSnapshot>, SessionError> {
        self.transition(SessionState::Loading);
        match SiteDataset::from_geojson_str(raw) {
            Ok(dataset) => self.install(dataset, file_name.into(), None),
            Err(e) => Err(self.fail(e.into(), SessionState::Error)),
        }
    }

    /// Load a completed file read. Names not ending in `.geojson` are refused
    /// before anything else happens.
    pub fn load_upload(&mut self, upload: Upload) -> Result<Arc<SiteSnapshot>, SessionError> {
        if let Err(e) = check_file_type(&upload.file_name) {
            return Err(self.fail(e.into(), self.state));
        }
        self.load_from_source(&upload.contents, upload.file_name)
    }

    /// Validate and apply new parameters, recomputing the current site if any.
    pub fn update_parameters(
        &mut self,
        parameters: ZoningParameters,
    ) -> Result<Option<Arc<SiteSnapshot>>, SessionError> {
        let Some(current) = self.current.clone() else {
            if let Err(e) = parameters.validate(None) {
                return Err(self.fail(e.into(), self.state));
            }
            self.parameters = parameters;
            return Ok(None);
        };

        let declared = current.dataset.footprint().declared_relative_height_m;
        if let Err(e) = parameters.validate(declared) {
            return Err(self.fail(e.into(), self.state));
        }

        let built = self.build(
            Arc::clone(&current.dataset),
            current.file_name.clone(),
            parameters,
            &self.observations,
            current.view,
        );
        match built {
            Ok(snapshot) => {
                self.parameters = parameters;
                Ok(Some(self.publish(snapshot)))
            }
            Err(e) => Err(self.fail(e, self.state)),
        }
    }

    /// Replace the observation points and recompute the current site if any.
    pub fn set_observation_points(
        &mut self,
        points: Vec<ObservationPoint>,
    ) -> Result<Option<Arc<SiteSnapshot>>, SessionError> {
        let Some(current) = self.current.clone() else {
            self.observations = points;
            self.custom_observations = true;
            return Ok(None);
        };

        let built = self.build(
            Arc::clone(&current.dataset),
            current.file_name.clone(),
            self.parameters,
            &points,
            current.view,
        );
        match built {
            Ok(snapshot) => {
                self.observations = points;
                self.custom_observations = true;
                Ok(Some(self.publish(snapshot)))
            }
            Err(e) => Err(self.fail(e, self.state)),
        }
    }

    /// Canonical GeoJSON of the current dataset, under its load name.
    pub fn export(&self) -> Result<DatasetExport, SessionError> {
        let current = self.current.as_ref().ok_or(SessionError::NothingLoaded)?;
        current
            .dataset
            .export(current.file_name.clone())
            .map_err(SessionError::Export)
    }

    pub fn hover(&self, event: &PointerEvent) -> TooltipState {
        match &self.current {
            Some(snapshot) => scene::hover(&snapshot.scene, event),
            None => TooltipState::Hidden,
        }
    }

    pub fn click(&self, event: &PointerEvent) -> ClickOutcome {
        scene::click(event)
    }

    fn install(
        &mut self,
        dataset: SiteDataset,
        file_name: String,
        cameras: Option<Vec<ObservationPoint>>,
    ) -> Result<Arc<SiteSnapshot>, SessionError> {
        let parameters = match self.config.reset_policy {
            ResetPolicy::Reset => self.config.default_parameters,
            ResetPolicy::Preserve => self.parameters,
        };
        let previous_view = self
            .current
            .as_ref()
            .map_or(self.config.initial_view, |s| s.view);
        let observations = cameras.as_deref().unwrap_or(&self.observations);

        let built = self.build(
            Arc::new(dataset),
            file_name,
            parameters,
            observations,
            previous_view,
        );
        let snapshot = match built {
            Ok(snapshot) => snapshot,
            Err(e) => return Err(self.fail(e, SessionState::Error)),
        };

        let snapshot = match snapshot.metrics.centroid {
            Some(center) => SiteSnapshot {
                view: snapshot.view.framing(center),
                ..snapshot
            },
            None => snapshot,
        };

        if let Some(cameras) = cameras {
            self.observations = cameras;
        }
        self.parameters = parameters;
        info!(
            file = %snapshot.file_name,
            features = snapshot.dataset.collection().features.len(),
            land_area_m2 = snapshot.metrics.land_area_m2,
            "site loaded"
        );
        Ok(self.publish(snapshot))
    }

    fn build(
        &self,
        dataset: Arc<SiteDataset>,
        file_name: String,
        parameters: ZoningParameters,
        observations: &[ObservationPoint],
        view: ViewState,
    ) -> Result<SiteSnapshot, SessionError> {
        let footprint = dataset.footprint();
        let parcel = dataset.parcel();

        let metrics = site_metrics(
            &parcel.ring,
            &footprint.ring,
            footprint.declared_relative_height_m,
            &parameters,
        )?;
        let scene = self.assembler.assemble(
            &parcel.ring,
            &footprint.ring,
            footprint.base_elevation_m,
            metrics.building_height_m,
            observations,
        )?;
        debug!(
            volume_m3 = metrics.volume_m3,
            height_m = metrics.building_height_m,
            markers = scene.markers.markers.len(),
            "site recomputed"
        );

        Ok(SiteSnapshot {
            generation: self.generation + 1,
            file_name,
            dataset,
            parameters,
            metrics,
            scene,
            view,
        })
    }

    fn publish(&mut self, snapshot: SiteSnapshot) -> Arc<SiteSnapshot> {
        let snapshot = Arc::new(snapshot);
        self.generation = snapshot.generation;
        self.current = Some(Arc::clone(&snapshot));
        self.events.emit(SessionEvent::SnapshotPublished {
            generation: snapshot.generation,
        });
        self.transition(SessionState::Ready);
        snapshot
    }

    fn fail(&mut self, error: SessionError, next: SessionState) -> SessionError {
        warn!(error = %error, "session action failed");
        self.events.emit(SessionEvent::Failed {
            message: error.to_string(),
        });
        self.transition(next);
        error
    }

    fn transition(&mut self, to: SessionState) {
        if self.state == to {
            return;
        }
        debug!(from = ?self.state, to = ?to, "session state");
        self.events.emit(SessionEvent::StateChanged {
            from: self.state,
            to,
        });
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::{Session, SessionError, SessionState};
    use crate::config::{ResetPolicy, SessionConfig};
    use crate::event_bus::SessionEvent;
    use compute::ZoningParameters;
    use formats::{ObservationPoint, Upload};
    use foundation::math::GeoPoint;
    use pretty_assertions::assert_eq;
    use scene::{PointerEvent, SITE_ZOOM, TooltipState};

    fn assert_close(a: f64, b: f64, eps: f64) {
        let diff = (a - b).abs();
        assert!(diff <= eps, "expected {a} ~= {b} (diff {diff})");
    }

    const UNTAGGED_SITE: &str = r#"{ "type": "FeatureCollection", "features": [
        { "type": "Feature", "properties": {},
          "geometry": { "type": "Polygon", "coordinates":
            [[[10.0, 45.0], [10.001, 45.0], [10.001, 45.001], [10.0, 45.001], [10.0, 45.0]]] } }
    ] }"#;

    fn loaded() -> Session {
        let mut session = Session::default();
        session.load_default().unwrap();
        session
    }

    #[test]
    fn starts_idle_without_snapshot() {
        let session = Session::default();
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.snapshot().is_none());
        assert!(matches!(session.export(), Err(SessionError::NothingLoaded)));
    }

    #[test]
    fn load_default_publishes_a_framed_snapshot() {
        let mut session = Session::default();
        let snap = session.load_default().unwrap();

        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(snap.generation, 1);
        assert_eq!(snap.file_name, "heritageTrail.geojson");
        assert_eq!(snap.parameters, ZoningParameters::default());
        assert_eq!(snap.metrics.building_height_m, 12.5);
        assert!(!snap.scene.markers.markers.is_empty());

        let [lon, lat] = snap.metrics.centroid.unwrap();
        assert_eq!(snap.view.longitude, lon);
        assert_eq!(snap.view.latitude, lat);
        assert_eq!(snap.view.zoom, SITE_ZOOM);
        assert_eq!(snap.view.pitch, 45.0);

        assert_eq!(
            session.drain_events(),
            vec![
                SessionEvent::StateChanged {
                    from: SessionState::Idle,
                    to: SessionState::Loading
                },
                SessionEvent::SnapshotPublished { generation: 1 },
                SessionEvent::StateChanged {
                    from: SessionState::Loading,
                    to: SessionState::Ready
                },
            ]
        );
    }

    #[test]
    fn identical_updates_give_identical_metrics() {
        let mut session = loaded();
        let params = ZoningParameters::new(25.0, 4, 3.0);
        let a = session.update_parameters(params).unwrap().unwrap();
        let b = session.update_parameters(params).unwrap().unwrap();

        assert_eq!(a.metrics, b.metrics);
        assert_eq!(a.scene, b.scene);
        assert_eq!(b.generation, a.generation + 1);
        assert_eq!(session.parameters(), params);
    }

    #[test]
    fn coverage_change_scales_volume() {
        let mut session = loaded();
        let before = session.snapshot().unwrap();
        let after = session
            .update_parameters(ZoningParameters::new(25.0, 10, 10.0))
            .unwrap()
            .unwrap();
        assert_close(after.metrics.volume_m3 * 2.0, before.metrics.volume_m3, 1e-6);
        assert_eq!(after.metrics.land_area_m2, before.metrics.land_area_m2);
        assert_eq!(after.view, before.view);
    }

    #[test]
    fn invalid_parameters_leave_everything_in_place() {
        let mut session = loaded();
        let before = session.snapshot().unwrap();
        session.drain_events();

        let err = session
            .update_parameters(ZoningParameters::new(101.0, 10, 10.0))
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidParameter(_)));
        assert_eq!(session.state(), SessionState::Ready);
        assert_eq!(session.parameters(), ZoningParameters::default());
        assert!(std::sync::Arc::ptr_eq(&before, &session.snapshot().unwrap()));
        assert!(matches!(
            session.events(),
            [SessionEvent::Failed { .. }]
        ));
    }

    #[test]
    fn failed_load_keeps_previous_snapshot() {
        let mut session = loaded();
        let before = session.snapshot().unwrap();

        let err = session.load_from_source("{ not json", "broken.geojson").unwrap_err();
        assert!(matches!(err, SessionError::Parse(_)));
        assert_eq!(session.state(), SessionState::Error);
        assert!(std::sync::Arc::ptr_eq(&before, &session.snapshot().unwrap()));

        session.load_from_source(UNTAGGED_SITE, "site.geojson").unwrap();
        assert_eq!(session.state(), SessionState::Ready);
    }

    #[test]
    fn degenerate_footprint_fails_the_load() {
        let mut session = loaded();
        let before = session.snapshot().unwrap();
        let line_like = r#"{ "type": "FeatureCollection", "features": [
            { "type": "Feature", "properties": {},
              "geometry": { "type": "Polygon", "coordinates": [[[0, 0], [1, 1], [0, 0]]] } }
        ] }"#;
        let err = session.load_from_source(line_like, "flat.geojson").unwrap_err();
        assert!(matches!(err, SessionError::DegenerateGeometry(_)));
        assert!(std::sync::Arc::ptr_eq(&before, &session.snapshot().unwrap()));
    }

    #[test]
    fn reload_resets_parameters_by_default() {
        let mut session = loaded();
        session
            .update_parameters(ZoningParameters::new(80.0, 3, 4.0))
            .unwrap();
        let snap = session.load_from_source(UNTAGGED_SITE, "site.geojson").unwrap();
        assert_eq!(snap.parameters, ZoningParameters::default());
        assert_eq!(snap.metrics.building_height_m, 100.0);
    }

    #[test]
    fn preserve_policy_keeps_edits_across_reloads() {
        let mut session = Session::new(SessionConfig {
            reset_policy: ResetPolicy::Preserve,
            ..SessionConfig::default()
        });
        session.load_default().unwrap();
        let params = ZoningParameters::new(80.0, 3, 4.0);
        session.update_parameters(params).unwrap();

        let snap = session.load_from_source(UNTAGGED_SITE, "site.geojson").unwrap();
        assert_eq!(snap.parameters, params);
        assert_eq!(snap.metrics.building_height_m, 12.0);
    }

    #[test]
    fn upload_gate_refuses_other_extensions() {
        let mut session = loaded();
        session.drain_events();
        let before = session.snapshot().unwrap();

        let err = session
            .load_upload(Upload::new("site.json", UNTAGGED_SITE))
            .unwrap_err();
        assert!(matches!(err, SessionError::UnsupportedFileType(_)));
        assert_eq!(session.state(), SessionState::Ready);
        assert!(std::sync::Arc::ptr_eq(&before, &session.snapshot().unwrap()));

        let snap = session
            .load_upload(Upload::new("Site.GeoJSON", UNTAGGED_SITE))
            .unwrap();
        assert_eq!(snap.file_name, "Site.GeoJSON");
        assert_eq!(session.export().unwrap().file_name, "Site.GeoJSON");
    }

    #[test]
    fn observation_points_drive_markers_and_tooltips() {
        let mut session = loaded();
        let cameras = vec![ObservationPoint {
            position: GeoPoint::new(0.464, 50.998),
            bearing_deg: 200.0,
            altitude_m: 35.5,
        }];
        let snap = session.set_observation_points(cameras).unwrap().unwrap();
        assert_eq!(snap.scene.markers.markers.len(), 1);
        assert_eq!(snap.scene.markers.markers[0].orientation, [0.0, -200.0, 90.0]);

        let event = PointerEvent {
            x: 10.0,
            y: 20.0,
            picked_marker: Some(0),
            coordinate: [360.464, 50.998],
            viewport_longitude: 0.46,
        };
        let TooltipState::Visible(tooltip) = session.hover(&event) else {
            panic!("expected tooltip");
        };
        assert_eq!(tooltip.lines, vec!["Altitude: 35.50m", "Heading: 200.00°"]);
        assert_close(tooltip.coordinate[0], 0.464, 1e-9);
        assert!(!session.click(&event).tooltip.is_visible());

        // Uploads keep the explicitly set cameras.
        let snap = session.load_from_source(UNTAGGED_SITE, "site.geojson").unwrap();
        assert_eq!(snap.scene.markers.markers.len(), 1);
    }

    #[test]
    fn export_is_stable_across_recomputes() {
        let mut session = loaded();
        let a = session.export().unwrap();
        session
            .update_parameters(ZoningParameters::new(30.0, 2, 3.0))
            .unwrap();
        let b = session.export().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.file_name, "heritageTrail.geojson");
    }
}
