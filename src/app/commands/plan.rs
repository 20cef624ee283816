//! Validate, resolve, and plan a world without touching the filesystem.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::load_document;
use super::validate::validate_text;
use crate::app::AppContext;
use crate::domain::plan::plan as build_plan;
use crate::domain::{AppError, Plan, Variables, WorldConfig, resolve_with};
use crate::ports::{ScaffoldFilesystem, WorldCatalog, WorldOrigin};

/// Explicit inputs that make a plan deterministic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldInputs {
    /// Scaffold root; relative paths resolve against the working directory.
    pub root: PathBuf,
    pub now: DateTime<Utc>,
    pub user: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanOutcome {
    pub name: String,
    pub origin: WorldOrigin,
    #[serde(skip)]
    pub world: WorldConfig,
    pub digest: String,
    pub plan: Plan,
}

pub fn execute<F: ScaffoldFilesystem, C: WorldCatalog>(
    ctx: &AppContext<F, C>,
    reference: &str,
    inputs: &ScaffoldInputs,
) -> Result<PlanOutcome, AppError> {
    let document = load_document(ctx, reference)?;
    let config = ctx.config();
    let world = validate_text(&document.content, &config.engine.schema_version)?;

    let variables = Variables::builtin(inputs.now, &inputs.user).with_extra(&config.variables);
    let world = resolve_with(world, &variables);

    let root = ctx.absolute(&inputs.root);
    let plan = build_plan(&world, &root, &config.planner_options())?;
    tracing::info!(world = %document.name, operations = plan.len(), "plan ready");

    Ok(PlanOutcome { name: document.name, origin: document.origin, world, digest: plan.digest(), plan })
}
