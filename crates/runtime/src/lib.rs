//! Site session controller: loads datasets, reruns metrics and scene assembly
//! on every change, and publishes whole snapshots.

pub mod config;
pub mod event_bus;
pub mod session;

pub use config::*;
pub use event_bus::*;
pub use session::*;
