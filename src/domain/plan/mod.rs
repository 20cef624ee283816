//! Side-effect-free scaffold plans.

pub mod operation;
pub mod planner;

pub use operation::{Operation, Plan};
pub use planner::{DEFAULT_INTEGRITY_DIR, DEFAULT_MAX_DEPTH, PlannerOptions, plan};
