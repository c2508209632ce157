use compute::{ParameterError, ZoningParameters};
use scene::ViewState;
use scene::components::TerrainDrape;
use serde::{Deserialize, Serialize};

/// What happens to user-edited parameters when a new dataset is loaded.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResetPolicy {
    /// Go back to `SessionConfig::default_parameters` on every successful load.
    #[default]
    Reset,
    /// Keep the current parameters across loads.
    Preserve,
}

/// Session settings. Every field is optional in JSON and falls back to its default.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionConfig {
    pub default_parameters: ZoningParameters,
    pub reset_policy: ResetPolicy,
    pub terrain: TerrainDrape,
    pub initial_view: ViewState,
}

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Json(serde_json::Error),
    InvalidDefaults(ParameterError),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "failed to read config: {e}"),
            ConfigError::Json(e) => write!(f, "invalid config: {e}"),
            ConfigError::InvalidDefaults(e) => write!(f, "invalid default parameters: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Json(e) => Some(e),
            ConfigError::InvalidDefaults(e) => Some(e),
        }
    }
}

impl SessionConfig {
    /// Parse and check the defaults. They must be usable on a dataset that
    /// declares no building height, since every reset falls back to them.
    pub fn from_json_str(payload: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(payload).map_err(ConfigError::Json)?;
        config
            .default_parameters
            .validate(None)
            .map_err(ConfigError::InvalidDefaults)?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, ResetPolicy, SessionConfig};
    use compute::{ParameterError, ZoningParameters};
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_object_is_the_default_config() {
        let cfg = SessionConfig::from_json_str("{}").unwrap();
        assert_eq!(cfg, SessionConfig::default());
        assert_eq!(cfg.reset_policy, ResetPolicy::Reset);
        assert_eq!(cfg.default_parameters, ZoningParameters::default());
        assert_eq!(cfg.initial_view.zoom, 4.0);
    }

    #[test]
    fn partial_config_overrides_named_fields_only() {
        let cfg = SessionConfig::from_json_str(
            r#"{
                "resetPolicy": "preserve",
                "defaultParameters": { "floorCount": 4 },
                "terrain": { "maxZoom": 16 }
            }"#,
        )
        .unwrap();
        assert_eq!(cfg.reset_policy, ResetPolicy::Preserve);
        assert_eq!(cfg.default_parameters, ZoningParameters::new(50.0, 4, 10.0));
        assert_eq!(cfg.terrain.max_zoom, 16);
        assert_eq!(cfg.terrain.min_zoom, 0);
    }

    #[test]
    fn rejects_unusable_default_parameters() {
        let payload = r#"{ "defaultParameters": { "lotCoveragePercent": 150 } }"#;
        match SessionConfig::from_json_str(payload) {
            Err(ConfigError::InvalidDefaults(e)) => {
                assert_eq!(e, ParameterError::LotCoverageOutOfRange { value: 150.0 });
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(matches!(
            SessionConfig::from_json_str(r#"{ "defaultParameters": { "floorCount": 0 } }"#),
            Err(ConfigError::InvalidDefaults(ParameterError::NonPositiveFloorCount))
        ));
    }

    #[test]
    fn rejects_unknown_policy() {
        assert!(SessionConfig::from_json_str(r#"{ "resetPolicy": "sometimes" }"#).is_err());
    }
}
