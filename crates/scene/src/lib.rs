//! Renderer-agnostic scene records and the pointer handling that reads them.

pub mod components;
pub mod description;
pub mod picking;
pub mod view;

pub use description::*;
pub use picking::*;
pub use view::*;
