use foundation::math::GeoPoint;
use serde_json::{Map, Number, Value};

/// One GeoJSON position.
///
/// The ordinates are kept exactly as read (integer or float spelling, any
/// altitude or extra ordinate) so the dataset writes back unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct Position {
    point: GeoPoint,
    ordinates: Vec<Number>,
}

impl Position {
    pub fn from_value(value: &Value) -> Result<Self, String> {
        let ordinates: Vec<Number> = value
            .as_array()
            .ok_or("position must be an array".to_string())?
            .iter()
            .enumerate()
            .map(|(i, v)| match v {
                Value::Number(n) => Ok(n.clone()),
                _ => Err(format!("{} must be a number", ordinate_name(i))),
            })
            .collect::<Result<_, _>>()?;

        let [lon, lat] = match ordinates.as_slice() {
            [lon, lat, ..] => [lon, lat].map(|n| n.as_f64().unwrap_or(f64::NAN)),
            _ => return Err("position must have [lon, lat]".to_string()),
        };

        Ok(Self {
            point: GeoPoint::new(lon, lat),
            ordinates,
        })
    }

    pub fn point(&self) -> GeoPoint {
        self.point
    }

    /// Third ordinate, when the position carries one.
    pub fn altitude(&self) -> Option<f64> {
        self.ordinates.get(2).and_then(Number::as_f64)
    }

    fn to_value(&self) -> Value {
        Value::Array(self.ordinates.iter().cloned().map(Value::Number).collect())
    }
}

fn ordinate_name(index: usize) -> &'static str {
    match index {
        0 => "longitude",
        1 => "latitude",
        2 => "altitude",
        _ => "ordinate",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(Position),
    MultiPoint(Vec<Position>),
    LineString(Vec<Position>),
    MultiLineString(Vec<Vec<Position>>),
    Polygon(Vec<Vec<Position>>),
    MultiPolygon(Vec<Vec<Vec<Position>>>),
}

impl Geometry {
    /// Outer ring of a Polygon, or of the first polygon of a MultiPolygon.
    pub fn outer_ring(&self) -> Option<Vec<GeoPoint>> {
        let ring = match self {
            Geometry::Polygon(rings) => rings.first(),
            Geometry::MultiPolygon(polys) => polys.first().and_then(|rings| rings.first()),
            _ => None,
        }?;
        Some(ring.iter().map(Position::point).collect())
    }

    pub fn is_areal(&self) -> bool {
        matches!(self, Geometry::Polygon(_) | Geometry::MultiPolygon(_))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
        }
    }

    fn from_value(value: &Value) -> Result<Self, String> {
        let obj = value
            .as_object()
            .ok_or("geometry must be an object".to_string())?;
        let kind = obj
            .get("type")
            .and_then(Value::as_str)
            .ok_or("geometry missing type".to_string())?;
        let coords = obj
            .get("coordinates")
            .ok_or("geometry missing coordinates".to_string())?;

        Ok(match kind {
            "Point" => Geometry::Point(Position::from_value(coords)?),
            "MultiPoint" => Geometry::MultiPoint(positions(coords)?),
            "LineString" => Geometry::LineString(positions(coords)?),
            "MultiLineString" => Geometry::MultiLineString(rings(coords)?),
            "Polygon" => Geometry::Polygon(rings(coords)?),
            "MultiPolygon" => Geometry::MultiPolygon(list(coords, "polygons", rings)?),
            other => return Err(format!("unsupported geometry type: {other}")),
        })
    }

    fn to_value(&self) -> Value {
        let coordinates = match self {
            Geometry::Point(p) => p.to_value(),
            Geometry::MultiPoint(ps) | Geometry::LineString(ps) => positions_value(ps),
            Geometry::MultiLineString(rs) | Geometry::Polygon(rs) => rings_value(rs),
            Geometry::MultiPolygon(polys) => {
                Value::Array(polys.iter().map(|rs| rings_value(rs)).collect())
            }
        };

        let mut obj = Map::new();
        obj.insert("type".to_string(), Value::from(self.type_name()));
        obj.insert("coordinates".to_string(), coordinates);
        Value::Object(obj)
    }
}

fn list<T>(
    value: &Value,
    what: &str,
    item: impl Fn(&Value) -> Result<T, String>,
) -> Result<Vec<T>, String> {
    value
        .as_array()
        .ok_or(format!("coordinates must be an array of {what}"))?
        .iter()
        .map(item)
        .collect()
}

fn positions(value: &Value) -> Result<Vec<Position>, String> {
    list(value, "positions", Position::from_value)
}

fn rings(value: &Value) -> Result<Vec<Vec<Position>>, String> {
    list(value, "rings", positions)
}

fn positions_value(ps: &[Position]) -> Value {
    Value::Array(ps.iter().map(Position::to_value).collect())
}

fn rings_value(rs: &[Vec<Position>]) -> Value {
    Value::Array(rs.iter().map(|r| positions_value(r)).collect())
}

#[derive(Debug, Clone, PartialEq)]
pub struct Feature {
    /// String or number, as given.
    pub id: Option<Value>,
    /// `None` when the member was absent or `null`; written back as `null`.
    pub properties: Option<Map<String, Value>>,
    pub geometry: Geometry,
    /// Members other than `type`, `id`, `properties` and `geometry`.
    pub foreign_members: Map<String, Value>,
}

impl Feature {
    /// First of `keys` present as a number or a numeric string.
    pub fn number_property(&self, keys: &[&str]) -> Option<f64> {
        keys.iter()
            .filter_map(|k| self.property(k))
            .find_map(|v| match v {
                Value::Number(n) => n.as_f64(),
                Value::String(s) => s.trim().parse::<f64>().ok(),
                _ => None,
            })
    }

    pub fn str_property(&self, key: &str) -> Option<&str> {
        self.property(key).and_then(Value::as_str)
    }

    fn property(&self, key: &str) -> Option<&Value> {
        self.properties.as_ref().and_then(|p| p.get(key))
    }

    fn from_value(value: &Value) -> Result<Self, String> {
        let mut members = value
            .as_object()
            .cloned()
            .ok_or("feature must be an object".to_string())?;

        match members.remove("type") {
            Some(Value::String(t)) if t == "Feature" => {}
            Some(Value::String(t)) => return Err(format!("unexpected feature type: {t}")),
            _ => return Err("feature missing type".to_string()),
        }

        let id = match members.remove("id") {
            None | Some(Value::Null) => None,
            Some(id @ (Value::String(_) | Value::Number(_))) => Some(id),
            Some(_) => return Err("feature id must be a string or a number".to_string()),
        };

        let properties = match members.remove("properties") {
            None | Some(Value::Null) => None,
            Some(Value::Object(p)) => Some(p),
            Some(_) => return Err("feature properties must be an object".to_string()),
        };

        let geometry = members
            .remove("geometry")
            .ok_or("feature missing geometry".to_string())
            .and_then(|g| Geometry::from_value(&g))?;

        Ok(Self {
            id,
            properties,
            geometry,
            foreign_members: members,
        })
    }

    fn to_value(&self) -> Value {
        let mut obj = self.foreign_members.clone();
        obj.insert("type".to_string(), Value::from("Feature"));
        if let Some(id) = &self.id {
            obj.insert("id".to_string(), id.clone());
        }
        obj.insert(
            "properties".to_string(),
            self.properties.clone().map_or(Value::Null, Value::Object),
        );
        obj.insert("geometry".to_string(), self.geometry.to_value());
        Value::Object(obj)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FeatureCollection {
    pub features: Vec<Feature>,
    /// Top-level members other than `type` and `features` (`name`, `crs`, `bbox`, ...).
    pub foreign_members: Map<String, Value>,
}

#[derive(Debug)]
pub enum GeoJsonError {
    Json(serde_json::Error),
    NotAFeatureCollection,
    InvalidFeature { index: usize, reason: String },
}

impl std::fmt::Display for GeoJsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoJsonError::Json(e) => write!(f, "JSON parse error: {e}"),
            GeoJsonError::NotAFeatureCollection => {
                write!(f, "expected GeoJSON FeatureCollection")
            }
            GeoJsonError::InvalidFeature { index, reason } => {
                write!(f, "invalid feature at index {index}: {reason}")
            }
        }
    }
}

impl std::error::Error for GeoJsonError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeoJsonError::Json(e) => Some(e),
            _ => None,
        }
    }
}

impl FeatureCollection {
    pub fn from_geojson_str(payload: &str) -> Result<Self, GeoJsonError> {
        let value: Value = serde_json::from_str(payload).map_err(GeoJsonError::Json)?;
        Self::from_geojson_value(&value)
    }

    pub fn from_geojson_value(value: &Value) -> Result<Self, GeoJsonError> {
        let mut members = value
            .as_object()
            .cloned()
            .ok_or(GeoJsonError::NotAFeatureCollection)?;
        if members.remove("type").as_ref().and_then(Value::as_str) != Some("FeatureCollection") {
            return Err(GeoJsonError::NotAFeatureCollection);
        }
        let Some(Value::Array(raw_features)) = members.remove("features") else {
            return Err(GeoJsonError::NotAFeatureCollection);
        };

        let features: Vec<Feature> = raw_features
            .iter()
            .enumerate()
            .map(|(index, f)| {
                Feature::from_value(f)
                    .map_err(|reason| GeoJsonError::InvalidFeature { index, reason })
            })
            .collect::<Result<_, _>>()?;

        Ok(Self {
            features,
            foreign_members: members,
        })
    }

    /// The collection as loaded, with object keys in sorted order at every
    /// depth, so equal collections always serialize to the same bytes.
    pub fn to_geojson_value(&self) -> Value {
        let mut obj = self.foreign_members.clone();
        obj.insert("type".to_string(), Value::from("FeatureCollection"));
        obj.insert(
            "features".to_string(),
            Value::Array(self.features.iter().map(Feature::to_value).collect()),
        );
        canonical(Value::Object(obj))
    }

    pub fn to_geojson_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(&self.to_geojson_value())
    }
}

fn canonical(value: Value) -> Value {
    match value {
        Value::Object(obj) => {
            let mut entries: Vec<(String, Value)> = obj.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, canonical(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(canonical).collect()),
        other => other,
    }
}
