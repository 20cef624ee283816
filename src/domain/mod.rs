pub mod config;
pub mod config_value;
pub mod error;
pub mod execution;
pub mod identifiers;
pub mod plan;
pub mod variables;
pub mod world;

pub use config::{EngineConfig, SCHEMA_VERSION};
pub use config_value::ConfigValue;
pub use error::{AppError, PlanError, PlanErrorKind, ValidationError, ValidationErrorKind, exit_codes};
pub use execution::{
    ExecutionError, ExecutionErrorKind, ExecutionPolicy, ExecutionResult, ExecutionState,
    ExecutionStatus, ExistingPolicy, RollbackError,
};
pub use plan::{Operation, Plan, PlannerOptions};
pub use variables::{Variables, resolve, resolve_with};
pub use world::{Mode, PermissionClass, PermissionSet, WorldConfig};
