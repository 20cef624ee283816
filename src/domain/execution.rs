//! Execution policy and the structured outcome of a scaffold run.

use std::fmt;
use std::io;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::error::exit_codes;
use crate::domain::plan::Operation;

/// How failures are handled during execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionPolicy {
    /// Stop at the first failure instead of continuing.
    pub atomic: bool,
    /// Remove everything created so far when an atomic run fails.
    pub rollback_on_failure: bool,
}

impl Default for ExecutionPolicy {
    fn default() -> Self {
        Self { atomic: true, rollback_on_failure: true }
    }
}

/// Treatment of planned directories that already exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExistingPolicy {
    /// Empty directories are accepted as no-ops; populated ones fail.
    #[default]
    Empty,
    /// Any existing directory is accepted (idempotent re-run).
    Reuse,
}

/// Lifecycle of one execution run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionState {
    Pending,
    Running,
    Committed,
    RolledBack,
    PartiallyFailed,
}

impl ExecutionState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack | Self::PartiallyFailed)
    }
}

/// Terminal status reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionStatus {
    Committed,
    RolledBack,
    PartiallyFailed,
}

impl From<ExecutionStatus> for ExecutionState {
    fn from(status: ExecutionStatus) -> Self {
        match status {
            ExecutionStatus::Committed => ExecutionState::Committed,
            ExecutionStatus::RolledBack => ExecutionState::RolledBack,
            ExecutionStatus::PartiallyFailed => ExecutionState::PartiallyFailed,
        }
    }
}

impl fmt::Display for ExecutionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ExecutionStatus::Committed => "committed",
            ExecutionStatus::RolledBack => "rolled back",
            ExecutionStatus::PartiallyFailed => "partially failed",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ExecutionErrorKind {
    /// Something other than a directory occupies the path.
    PathConflict,
    /// The directory exists and already has content.
    NotEmpty,
    /// The operating system rejected the call.
    Io,
    /// Cancellation was requested between operations.
    Cancelled,
    /// The finished directory does not match the plan.
    Verification,
}

/// A failed operation during execution.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{path}: {message}")]
pub struct ExecutionError {
    pub kind: ExecutionErrorKind,
    pub path: PathBuf,
    pub message: String,
}

impl ExecutionError {
    pub fn new(kind: ExecutionErrorKind, path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self { kind, path: path.into(), message: message.into() }
    }

    pub fn io(path: impl Into<PathBuf>, err: &io::Error) -> Self {
        Self::new(ExecutionErrorKind::Io, path, format!("{} ({:?})", err, err.kind()))
    }
}

/// A created path the rollback could not remove.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("could not remove {path}: {message}")]
pub struct RollbackError {
    pub path: PathBuf,
    pub message: String,
}

/// Structured outcome of executing a plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionResult {
    pub status: ExecutionStatus,
    /// Directories created by this run that remain on disk, in creation order.
    pub created_paths: Vec<PathBuf>,
    /// Planned directories that already existed and were left untouched.
    pub reused_paths: Vec<PathBuf>,
    /// The operation that stopped an atomic run.
    pub failed_op: Option<Operation>,
    /// Original failure, preserved through rollback.
    pub cause: Option<ExecutionError>,
    /// Directories removed during rollback, in removal order.
    pub removed_paths: Vec<PathBuf>,
    /// Failures tolerated by a non-atomic run.
    pub partial_failures: Vec<ExecutionError>,
    /// Created directories that could not be cleaned up.
    pub leaked_paths: Vec<RollbackError>,
    /// Ownership changes that were skipped, with the reason.
    pub ownership_skipped: Vec<(PathBuf, String)>,
}

impl ExecutionResult {
    pub fn removed_count(&self) -> usize {
        self.removed_paths.len()
    }

    /// Committed with no tolerated failures.
    pub fn is_success(&self) -> bool {
        self.status == ExecutionStatus::Committed && self.partial_failures.is_empty()
    }

    pub fn exit_code(&self) -> i32 {
        match self.status {
            ExecutionStatus::Committed if self.partial_failures.is_empty() => exit_codes::SUCCESS,
            ExecutionStatus::Committed | ExecutionStatus::RolledBack => exit_codes::EXECUTION,
            ExecutionStatus::PartiallyFailed => exit_codes::PARTIALLY_FAILED,
        }
    }
}
