//! Pure parse/validate for engine configuration (`worldgen.toml`).

use crate::domain::{AppError, EngineConfig};

/// Parse and validate engine configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<EngineConfig, AppError> {
    let config: EngineConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
