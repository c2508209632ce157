use foundation::math::GeoPoint;
use serde::Serialize;

use crate::analysis::{ring_area, ring_centroid};
use crate::zoning::{ParameterError, ZoningParameters, derive_massing};

/// Derived site figures. Always produced as a whole by [`site_metrics`].
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteMetrics {
    pub land_area_m2: f64,
    pub building_footprint_area_m2: f64,
    pub building_height_m: f64,
    pub volume_m3: f64,
    /// `[lon, lat]` of the footprint; `None` when the footprint has no usable vertex.
    pub centroid: Option<[f64; 2]>,
}

/// Compute every metric from one (parcel, footprint, parameters) triple.
///
/// Land area comes from the parcel only; footprint area, centroid and massing
/// from the footprint only.
pub fn site_metrics(
    parcel: &[GeoPoint],
    footprint: &[GeoPoint],
    declared_relative_height: Option<f64>,
    params: &ZoningParameters,
) -> Result<SiteMetrics, ParameterError> {
    let land_area_m2 = ring_area(parcel);
    let footprint_area_m2 = ring_area(footprint);
    let massing = derive_massing(footprint_area_m2, params, declared_relative_height)?;

    Ok(SiteMetrics {
        land_area_m2,
        building_footprint_area_m2: massing.building_footprint_area_m2,
        building_height_m: massing.height_m,
        volume_m3: massing.volume_m3,
        centroid: ring_centroid(footprint).map(GeoPoint::as_array),
    })
}
