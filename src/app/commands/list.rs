//! Catalog listing.

use serde::Serialize;

use super::validate::validate_text;
use crate::app::AppContext;
use crate::domain::AppError;
use crate::ports::{CatalogEntry, ScaffoldFilesystem, WorldCatalog, WorldOrigin};

/// One catalog entry. Invalid entries carry `error` instead of details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldSummary {
    pub name: String,
    pub origin: WorldOrigin,
    pub world_type: Option<String>,
    pub description: Option<String>,
    pub error: Option<String>,
}

impl WorldSummary {
    fn failed(name: String, origin: WorldOrigin, error: String) -> Self {
        Self { name, origin, world_type: None, description: None, error: Some(error) }
    }
}

pub fn execute<F: ScaffoldFilesystem, C: WorldCatalog>(
    ctx: &AppContext<F, C>,
) -> Result<Vec<WorldSummary>, AppError> {
    let expected = &ctx.config().engine.schema_version;
    let summaries = ctx
        .catalog()
        .list_all()?
        .into_iter()
        .map(|entry| match entry {
            CatalogEntry::Readable(document) => match validate_text(&document.content, expected) {
                Ok(world) => WorldSummary {
                    name: document.name,
                    origin: document.origin,
                    world_type: Some(world.world_type),
                    description: Some(world.description),
                    error: None,
                },
                Err(err) => {
                    tracing::warn!(world = %document.name, error = %err, "catalog entry is invalid");
                    WorldSummary::failed(document.name, document.origin, err.to_string())
                }
            },
            CatalogEntry::Unreadable { name, origin, error } => WorldSummary::failed(name, origin, error),
        })
        .collect();
    Ok(summaries)
}
