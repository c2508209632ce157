use foundation::math::GeoPoint;

use crate::geojson::{Feature, FeatureCollection, GeoJsonError};

/// Base elevation property, current name first, then the legacy export name.
pub const MINIMUM_ABSOLUTE_HEIGHT_KEYS: &[&str] = &["minimumAbsoluteHeight", "absoluteheightminimum"];
/// Building height above base, current name first, then the legacy export name.
pub const MAXIMUM_RELATIVE_HEIGHT_KEYS: &[&str] = &["maximumRelativeHeight", "relativeheightmaximum"];
/// Optional property tagging a feature as `"footprint"` or `"parcel"`.
pub const ROLE_KEY: &str = "role";

const DEFAULT_DATASET: &str = include_str!("../assets/heritage_trail.geojson");
pub const DEFAULT_DATASET_FILE_NAME: &str = "heritageTrail.geojson";

#[derive(Debug)]
pub enum DatasetError {
    GeoJson(GeoJsonError),
    NoPolygonFeature,
}

impl std::fmt::Display for DatasetError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DatasetError::GeoJson(e) => write!(f, "malformed dataset: {e}"),
            DatasetError::NoPolygonFeature => {
                write!(f, "malformed dataset: no Polygon or MultiPolygon feature")
            }
        }
    }
}

impl std::error::Error for DatasetError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DatasetError::GeoJson(e) => Some(e),
            DatasetError::NoPolygonFeature => None,
        }
    }
}

impl From<GeoJsonError> for DatasetError {
    fn from(e: GeoJsonError) -> Self {
        DatasetError::GeoJson(e)
    }
}

/// One polygon of the site, with the height attributes read off its feature.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteFeature {
    pub feature_index: usize,
    pub ring: Vec<GeoPoint>,
    /// Base elevation in meters; `0.0` when the feature does not declare one.
    pub base_elevation_m: f64,
    pub declared_relative_height_m: Option<f64>,
}

impl SiteFeature {
    fn from_feature(feature_index: usize, feature: &Feature) -> Option<Self> {
        let ring = feature.geometry.outer_ring()?;
        Some(Self {
            feature_index,
            ring,
            base_elevation_m: feature
                .number_property(MINIMUM_ABSOLUTE_HEIGHT_KEYS)
                .filter(|v| v.is_finite())
                .unwrap_or(0.0),
            declared_relative_height_m: feature.number_property(MAXIMUM_RELATIVE_HEIGHT_KEYS),
        })
    }
}

/// A loaded feature collection plus the footprint and parcel selected from it.
///
/// Selection: the first areal feature whose `role` is `footprint` (resp.
/// `parcel`). Without a tagged footprint, the first areal feature not tagged
/// as the parcel is used, and only if there is none the parcel itself.
/// Without a tagged parcel, the footprint feature doubles as the parcel.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteDataset {
    collection: FeatureCollection,
    footprint: SiteFeature,
    parcel: SiteFeature,
}

impl SiteDataset {
    pub fn from_geojson_str(payload: &str) -> Result<Self, DatasetError> {
        Self::new(FeatureCollection::from_geojson_str(payload)?)
    }

    /// Built-in sample site.
    pub fn builtin() -> Result<Self, DatasetError> {
        Self::from_geojson_str(DEFAULT_DATASET)
    }

    pub fn new(collection: FeatureCollection) -> Result<Self, DatasetError> {
        let footprint = select(&collection, "footprint")
            .or_else(|| {
                first_areal(&collection, |f| f.str_property(ROLE_KEY) != Some("parcel"))
            })
            .or_else(|| first_areal(&collection, |_| true))
            .ok_or(DatasetError::NoPolygonFeature)?;
        let parcel = select(&collection, "parcel").unwrap_or_else(|| footprint.clone());

        Ok(Self {
            collection,
            footprint,
            parcel,
        })
    }

    pub fn collection(&self) -> &FeatureCollection {
        &self.collection
    }

    pub fn footprint(&self) -> &SiteFeature {
        &self.footprint
    }

    pub fn parcel(&self) -> &SiteFeature {
        &self.parcel
    }
}

fn select(collection: &FeatureCollection, role: &str) -> Option<SiteFeature> {
    collection
        .features
        .iter()
        .enumerate()
        .filter(|(_, f)| f.geometry.is_areal() && f.str_property(ROLE_KEY) == Some(role))
        .find_map(|(i, f)| SiteFeature::from_feature(i, f))
}

fn first_areal(
    collection: &FeatureCollection,
    eligible: impl Fn(&Feature) -> bool,
) -> Option<SiteFeature> {
    collection
        .features
        .iter()
        .enumerate()
        .filter(|(_, f)| eligible(f))
        .find_map(|(i, f)| SiteFeature::from_feature(i, f))
}
