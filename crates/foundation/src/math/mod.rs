pub mod geodesy;
pub mod longitude;

pub use geodesy::*;
pub use longitude::*;
