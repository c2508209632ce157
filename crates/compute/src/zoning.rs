use serde::{Deserialize, Serialize};

pub const DEFAULT_LOT_COVERAGE_PERCENT: f64 = 50.0;
pub const DEFAULT_FLOOR_COUNT: u32 = 10;
pub const DEFAULT_FLOOR_HEIGHT_M: f64 = 10.0;

/// User-editable zoning inputs.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ZoningParameters {
    pub lot_coverage_percent: f64,
    pub floor_count: u32,
    pub floor_height_m: f64,
}

impl Default for ZoningParameters {
    fn default() -> Self {
        Self {
            lot_coverage_percent: DEFAULT_LOT_COVERAGE_PERCENT,
            floor_count: DEFAULT_FLOOR_COUNT,
            floor_height_m: DEFAULT_FLOOR_HEIGHT_M,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ParameterError {
    LotCoverageOutOfRange { value: f64 },
    NonPositiveFloorCount,
    NonPositiveFloorHeight { value: f64 },
}

impl std::fmt::Display for ParameterError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParameterError::LotCoverageOutOfRange { value } => {
                write!(f, "lot coverage must be within 0..=100 percent, got {value}")
            }
            ParameterError::NonPositiveFloorCount => {
                write!(f, "floor count must be positive when no building height is declared")
            }
            ParameterError::NonPositiveFloorHeight { value } => write!(
                f,
                "floor height must be positive when no building height is declared, got {value}"
            ),
        }
    }
}

impl std::error::Error for ParameterError {}

/// Height, footprint and volume of the modelled building.
#[derive(Debug, Copy, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Massing {
    pub height_m: f64,
    pub building_footprint_area_m2: f64,
    pub volume_m3: f64,
}

impl ZoningParameters {
    pub fn new(lot_coverage_percent: f64, floor_count: u32, floor_height_m: f64) -> Self {
        Self {
            lot_coverage_percent,
            floor_count,
            floor_height_m,
        }
    }

    /// Check the parameters against the failure conditions of [`derive_massing`].
    ///
    /// Floor inputs only matter when the footprint does not declare a height.
    pub fn validate(&self, declared_relative_height: Option<f64>) -> Result<(), ParameterError> {
        let coverage = self.lot_coverage_percent;
        if !(0.0..=100.0).contains(&coverage) {
            return Err(ParameterError::LotCoverageOutOfRange { value: coverage });
        }
        if usable_declared_height(declared_relative_height).is_some() {
            return Ok(());
        }
        if self.floor_count == 0 {
            return Err(ParameterError::NonPositiveFloorCount);
        }
        if !(self.floor_height_m.is_finite() && self.floor_height_m > 0.0) {
            return Err(ParameterError::NonPositiveFloorHeight {
                value: self.floor_height_m,
            });
        }
        Ok(())
    }

    /// `floor_count × floor_height`.
    pub fn stacked_height_m(&self) -> f64 {
        f64::from(self.floor_count) * self.floor_height_m
    }
}

/// A declared height counts only when it is finite and strictly positive.
pub fn usable_declared_height(declared_relative_height: Option<f64>) -> Option<f64> {
    declared_relative_height.filter(|h| h.is_finite() && *h > 0.0)
}

/// Derive building height and volume from a footprint area and zoning inputs.
///
/// - `height` is the declared relative height when usable, else floors × floor height
/// - `building_footprint_area = footprint_area × coverage / 100`
/// - `volume = building_footprint_area × height`
pub fn derive_massing(
    footprint_area_m2: f64,
    params: &ZoningParameters,
    declared_relative_height: Option<f64>,
) -> Result<Massing, ParameterError> {
    params.validate(declared_relative_height)?;

    let height_m = usable_declared_height(declared_relative_height)
        .unwrap_or_else(|| params.stacked_height_m());
    let building_footprint_area_m2 = footprint_area_m2 * (params.lot_coverage_percent / 100.0);
    let volume_m3 = building_footprint_area_m2 * height_m;

    Ok(Massing {
        height_m,
        building_footprint_area_m2,
        volume_m3,
    })
}
