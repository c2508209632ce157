pub mod extrusion;
pub mod ground;
pub mod marker;
pub mod style;
pub mod terrain;

pub use extrusion::*;
pub use ground::*;
pub use marker::*;
pub use style::*;
pub use terrain::*;
