pub mod area;
pub mod centroid;

pub use area::*;
pub use centroid::*;
