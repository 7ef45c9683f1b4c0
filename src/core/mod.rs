pub mod config;
pub mod error;
pub mod types;

pub use config::RenderConfig;
pub use error::{ArchitectError, Result};
pub use types::{Point, Rect};
