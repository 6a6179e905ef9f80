pub mod business;
pub mod catalog;
pub mod config;
pub mod error;
pub mod resolver;
pub mod routes;
pub mod synth;
pub mod types;

pub use business::*;
pub use catalog::*;
pub use config::{CatalogConfig, ConfigManager, LoggingConfig, Settings, SiteConfig};
pub use error::*;
pub use resolver::*;
pub use routes::*;
pub use synth::{resolve_condition, synthesize};
pub use types::*;
