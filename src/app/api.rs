//! API Facade for the application.
//!
//! Each operation has a variant that uses the current directory and an `_at`
//! variant that takes the working directory explicitly.

use std::env;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};

use crate::adapters::{FilesystemWorldCatalog, LocalFilesystem};
use crate::app::commands::{create, list, plan, show, validate};
use crate::app::config::load_config;
use crate::app::AppContext;

pub use crate::app::commands::create::CreateOutcome;
pub use crate::app::commands::list::WorldSummary;
pub use crate::app::commands::plan::{PlanOutcome, ScaffoldInputs};
pub use crate::app::commands::validate::ValidateOutcome;
pub use crate::app::services::CancelFlag;
pub use crate::domain::AppError;
pub use crate::ports::WorldDocument;

/// User identity used when none is given.
const UNKNOWN_USER: &str = "unknown";

/// Optional overrides for `${DATE}`, `${USER}`, and the scaffold root.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScaffoldRequest {
    /// Defaults to the working directory.
    pub root: Option<PathBuf>,
    /// Defaults to `$USER`, then `$USERNAME`.
    pub user: Option<String>,
    /// Defaults to the current time.
    pub now: Option<DateTime<Utc>>,
}

impl ScaffoldRequest {
    fn into_inputs(self, working_dir: &Path) -> ScaffoldInputs {
        ScaffoldInputs {
            root: self.root.unwrap_or_else(|| working_dir.to_path_buf()),
            now: self.now.unwrap_or_else(Utc::now),
            user: self.user.unwrap_or_else(current_user),
        }
    }
}

/// Login name from the environment.
pub fn current_user() -> String {
    ["USER", "USERNAME"]
        .iter()
        .filter_map(|key| env::var(key).ok())
        .find(|value| !value.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_USER.to_string())
}

/// Create an `AppContext` rooted at `working_dir`.
fn create_context(
    working_dir: PathBuf,
    config_file: Option<&Path>,
) -> Result<AppContext<LocalFilesystem, FilesystemWorldCatalog>, AppError> {
    let loaded = load_config(config_file, &working_dir)?;
    let catalog = FilesystemWorldCatalog::new(loaded.worlds_dir);
    Ok(AppContext::new(LocalFilesystem::new(), catalog, loaded.config, working_dir))
}

// =============================================================================
// Validate
// =============================================================================

/// Validate a world config given as a path or catalog name.
pub fn validate_world(world: &str, config_file: Option<&Path>) -> Result<ValidateOutcome, AppError> {
    validate_world_at(env::current_dir()?, world, config_file)
}

pub fn validate_world_at(
    working_dir: PathBuf,
    world: &str,
    config_file: Option<&Path>,
) -> Result<ValidateOutcome, AppError> {
    let ctx = create_context(working_dir, config_file)?;
    validate::execute(&ctx, world)
}

// =============================================================================
// Plan
// =============================================================================

/// Compute the operation list for a world without side effects.
pub fn plan_world(
    world: &str,
    request: ScaffoldRequest,
    config_file: Option<&Path>,
) -> Result<PlanOutcome, AppError> {
    plan_world_at(env::current_dir()?, world, request, config_file)
}

pub fn plan_world_at(
    working_dir: PathBuf,
    world: &str,
    request: ScaffoldRequest,
    config_file: Option<&Path>,
) -> Result<PlanOutcome, AppError> {
    let inputs = request.into_inputs(&working_dir);
    let ctx = create_context(working_dir, config_file)?;
    plan::execute(&ctx, world, &inputs)
}

// =============================================================================
// Create
// =============================================================================

/// Materialize a world on disk.
///
/// Validation and plan failures are returned as errors. Execution failures
/// are reported through the outcome's `ExecutionResult`.
pub fn create_world(
    world: &str,
    request: ScaffoldRequest,
    config_file: Option<&Path>,
    cancel: &CancelFlag,
) -> Result<CreateOutcome, AppError> {
    create_world_at(env::current_dir()?, world, request, config_file, cancel)
}

pub fn create_world_at(
    working_dir: PathBuf,
    world: &str,
    request: ScaffoldRequest,
    config_file: Option<&Path>,
    cancel: &CancelFlag,
) -> Result<CreateOutcome, AppError> {
    let inputs = request.into_inputs(&working_dir);
    let ctx = create_context(working_dir, config_file)?;
    create::execute(&ctx, world, &inputs, cancel)
}

// =============================================================================
// Catalog
// =============================================================================

/// Built-in and catalog worlds, sorted by name.
pub fn list_worlds(config_file: Option<&Path>) -> Result<Vec<WorldSummary>, AppError> {
    list_worlds_at(env::current_dir()?, config_file)
}

pub fn list_worlds_at(working_dir: PathBuf, config_file: Option<&Path>) -> Result<Vec<WorldSummary>, AppError> {
    let ctx = create_context(working_dir, config_file)?;
    list::execute(&ctx)
}

/// Raw YAML of a named world.
pub fn show_world(name: &str, config_file: Option<&Path>) -> Result<WorldDocument, AppError> {
    show_world_at(env::current_dir()?, name, config_file)
}

pub fn show_world_at(
    working_dir: PathBuf,
    name: &str,
    config_file: Option<&Path>,
) -> Result<WorldDocument, AppError> {
    let ctx = create_context(working_dir, config_file)?;
    show::execute(&ctx, name)
}
