pub mod model;
pub mod parse;
pub mod paths;

pub use model::{CatalogSection, EngineConfig, EngineSection, SCHEMA_VERSION};
pub use parse::parse_config_content;
