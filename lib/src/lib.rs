mod bisector;
mod config;
mod error;
mod metrics;
mod model;
mod scene;
mod shots;
mod swing;
mod transform;

pub use bisector::*;
pub use config::*;
pub use error::*;
pub use metrics::*;
pub use model::*;
pub use scene::*;
pub use shots::*;
pub use swing::*;
pub use transform::*;
