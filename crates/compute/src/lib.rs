//! Geometry metrics engine: ring area, centroid and the zoning massing model.
//!
//! Everything here is a pure function of its inputs so a session can re-derive
//! metrics at any time and get bit-identical results.

pub mod analysis;
pub mod site;
pub mod zoning;

pub use analysis::*;
pub use site::*;
pub use zoning::*;
