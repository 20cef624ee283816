//! Validate command implementation.

use std::path::Path;

use crate::domain::AppError;

pub fn run_validate(world: &str, config: Option<&Path>) -> Result<(), AppError> {
    let outcome = crate::app::api::validate_world(world, config)?;
    let world_config = &outcome.world;
    println!(
        "✅ {} is valid ({}, {} parent director{}, from {})",
        outcome.name,
        world_config.world_type,
        world_config.parent_directories.len(),
        if world_config.parent_directories.len() == 1 { "y" } else { "ies" },
        outcome.origin
    );
    Ok(())
}
