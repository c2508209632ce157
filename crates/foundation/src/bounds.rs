use crate::math::GeoPoint;

/// Axis-aligned bounding box in `[x, y]` (lon/lat degrees for geographic input).
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Aabb2 {
    pub min: [f64; 2],
    pub max: [f64; 2],
}

impl Aabb2 {
    pub fn new(min: [f64; 2], max: [f64; 2]) -> Self {
        Aabb2 { min, max }
    }

    pub fn from_points(points: &[GeoPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut min = [first.lon_deg, first.lat_deg];
        let mut max = min;
        for p in points.iter().skip(1) {
            min[0] = min[0].min(p.lon_deg);
            min[1] = min[1].min(p.lat_deg);
            max[0] = max[0].max(p.lon_deg);
            max[1] = max[1].max(p.lat_deg);
        }
        Some(Self::new(min, max))
    }

    pub fn width(&self) -> f64 {
        self.max[0] - self.min[0]
    }

    pub fn height(&self) -> f64 {
        self.max[1] - self.min[1]
    }

    /// Length of the longer side.
    pub fn extent(&self) -> f64 {
        self.width().max(self.height())
    }
}
