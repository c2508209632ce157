use foundation::math::GeoPoint;
use serde_json::Value;

use crate::geojson::Position;

const DEFAULT_OBSERVATIONS: &str = include_str!("../assets/heritage_trail_cameras.json");

static NO_ATTRIBUTES: Value = Value::Null;

/// Camera pose record: where a photo was taken and which way it faced.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ObservationPoint {
    pub position: GeoPoint,
    /// Compass heading in degrees.
    pub bearing_deg: f64,
    pub altitude_m: f64,
}

#[derive(Debug)]
pub enum ObservationError {
    Json(serde_json::Error),
    NotARecordList,
    InvalidRecord { index: usize, reason: String },
}

impl std::fmt::Display for ObservationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObservationError::Json(e) => write!(f, "JSON parse error: {e}"),
            ObservationError::NotARecordList => {
                write!(f, "expected an array of records or a FeatureCollection of points")
            }
            ObservationError::InvalidRecord { index, reason } => {
                write!(f, "invalid observation at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for ObservationError {}

/// Parse camera records.
///
/// Accepts either a plain array of
/// `{ "coordinates": [lon, lat(, alt)], "bearing": deg, "altitude": m }`
/// or a GeoJSON FeatureCollection of Points carrying `bearing` / `altitude`
/// properties. A missing `altitude` falls back to the third ordinate, then 0.
pub fn parse_observations(payload: &str) -> Result<Vec<ObservationPoint>, ObservationError> {
    let value: Value = serde_json::from_str(payload).map_err(ObservationError::Json)?;

    let records: Vec<(&Value, Option<&Value>)> = match &value {
        Value::Array(items) => items.iter().map(|r| (r, r.get("coordinates"))).collect(),
        Value::Object(obj)
            if obj.get("type").and_then(Value::as_str) == Some("FeatureCollection") =>
        {
            obj.get("features")
                .and_then(Value::as_array)
                .ok_or(ObservationError::NotARecordList)?
                .iter()
                .map(|f| {
                    let props = f.get("properties").unwrap_or(&NO_ATTRIBUTES);
                    let coords = f.get("geometry").and_then(|g| g.get("coordinates"));
                    (props, coords)
                })
                .collect()
        }
        _ => return Err(ObservationError::NotARecordList),
    };

    records
        .into_iter()
        .enumerate()
        .map(|(index, (attrs, coords))| {
            parse_record(attrs, coords)
                .map_err(|reason| ObservationError::InvalidRecord { index, reason })
        })
        .collect()
}

/// Camera records shipped with the built-in site.
pub fn builtin_observations() -> Result<Vec<ObservationPoint>, ObservationError> {
    parse_observations(DEFAULT_OBSERVATIONS)
}

fn parse_record(attrs: &Value, coords: Option<&Value>) -> Result<ObservationPoint, String> {
    let coords = coords.ok_or("record missing coordinates".to_string())?;
    let position = Position::from_value(coords)?;
    if !position.point().is_finite() {
        return Err("coordinates must be finite".to_string());
    }

    let bearing_deg = optional_number(attrs, "bearing")?.unwrap_or(0.0);
    let altitude_m = match optional_number(attrs, "altitude")? {
        Some(alt) => alt,
        None => position.altitude().unwrap_or(0.0),
    };

    Ok(ObservationPoint {
        position: position.point(),
        bearing_deg,
        altitude_m,
    })
}

fn optional_number(attrs: &Value, key: &str) -> Result<Option<f64>, String> {
    match attrs.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(v) => v
            .as_f64()
            .filter(|n| n.is_finite())
            .map(Some)
            .ok_or(format!("{key} must be a finite number")),
    }
}
