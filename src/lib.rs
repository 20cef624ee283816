//! worldgen: declarative, transactional workspace scaffolding.
//!
//! A world config (YAML) is validated, its `${NAME}` placeholders resolved,
//! turned into an ordered operation plan, and executed with all-or-nothing
//! semantics.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    CancelFlag, CreateOutcome, PlanOutcome, ScaffoldInputs, ScaffoldRequest, ValidateOutcome,
    WorldDocument, WorldSummary, create_world, create_world_at, current_user, list_worlds,
    list_worlds_at, plan_world, plan_world_at, show_world, show_world_at, validate_world,
    validate_world_at,
};
pub use app::services::{ExecutorOptions, execute};
pub use domain::{
    AppError, ConfigValue, EngineConfig, ExecutionResult, ExecutionStatus, Operation, Plan,
    PlannerOptions, ValidationError, Variables, WorldConfig,
};
