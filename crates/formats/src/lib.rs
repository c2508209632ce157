pub mod export;
pub mod geojson;
pub mod observation;
pub mod site;
pub mod upload;

pub use export::*;
pub use geojson::*;
pub use observation::*;
pub use site::*;
pub use upload::*;
