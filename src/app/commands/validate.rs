//! Schema validation of a world config.

use serde::Serialize;

use super::load_document;
use crate::app::AppContext;
use crate::domain::world::validate;
use crate::domain::{AppError, ConfigValue, WorldConfig};
use crate::ports::{ScaffoldFilesystem, WorldCatalog, WorldOrigin};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidateOutcome {
    pub name: String,
    pub origin: WorldOrigin,
    pub world: WorldConfig,
}

pub fn execute<F: ScaffoldFilesystem, C: WorldCatalog>(
    ctx: &AppContext<F, C>,
    reference: &str,
) -> Result<ValidateOutcome, AppError> {
    let document = load_document(ctx, reference)?;
    let world = validate_text(&document.content, &ctx.config().engine.schema_version)?;
    Ok(ValidateOutcome { name: document.name, origin: document.origin, world })
}

/// Parse YAML text and validate it against `expected_version`.
pub fn validate_text(content: &str, expected_version: &str) -> Result<WorldConfig, AppError> {
    let raw = ConfigValue::from_yaml_str(content)?;
    Ok(validate(&raw, expected_version)?)
}
