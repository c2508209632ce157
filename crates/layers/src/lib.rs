//! Scene assembler: turns site geometry and observation points into the
//! records of a [`scene::SceneDescription`].

pub mod assemble;
pub mod extrusion;
pub mod ground;
pub mod layer;
pub mod markers;
pub mod symbology;
pub mod terrain;

pub use assemble::*;
pub use layer::*;
