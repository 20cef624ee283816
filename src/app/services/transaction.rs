//! Transactional plan executor.
//!
//! Operations run strictly in plan order. Every directory this run creates is
//! appended to an undo log; on failure an atomic run removes the log in
//! reverse order. The original failure is kept next to the rollback outcome.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{
    ExecutionError, ExecutionErrorKind, ExecutionPolicy, ExecutionResult, ExecutionState,
    ExecutionStatus, ExistingPolicy, Mode, Operation, Plan, RollbackError,
};
use crate::ports::{OwnershipOutcome, PathState, ScaffoldFilesystem};

/// Cooperative cancellation, observed between operations.
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExecutorOptions {
    pub policy: ExecutionPolicy,
    pub existing: ExistingPolicy,
    /// Re-probe created directories after the last operation.
    pub verify: bool,
}

impl Default for ExecutorOptions {
    fn default() -> Self {
        Self { policy: ExecutionPolicy::default(), existing: ExistingPolicy::default(), verify: true }
    }
}

/// Apply `plan` to `fs`.
pub fn execute<F: ScaffoldFilesystem>(
    fs: &F,
    plan: &Plan,
    options: &ExecutorOptions,
    cancel: &CancelFlag,
) -> ExecutionResult {
    Transaction::new(fs, options).run(plan, cancel)
}

struct Created {
    path: PathBuf,
    mode: Mode,
    index: usize,
}

struct Transaction<'a, F: ScaffoldFilesystem> {
    fs: &'a F,
    options: &'a ExecutorOptions,
    state: ExecutionState,
    undo_log: Vec<Created>,
    reused: Vec<PathBuf>,
    partial_failures: Vec<ExecutionError>,
    ownership_skipped: Vec<(PathBuf, String)>,
}

impl<'a, F: ScaffoldFilesystem> Transaction<'a, F> {
    fn new(fs: &'a F, options: &'a ExecutorOptions) -> Self {
        Self {
            fs,
            options,
            state: ExecutionState::Pending,
            undo_log: Vec::new(),
            reused: Vec::new(),
            partial_failures: Vec::new(),
            ownership_skipped: Vec::new(),
        }
    }

    fn transition(&mut self, next: ExecutionState) {
        tracing::debug!(from = ?self.state, to = ?next, "execution state");
        self.state = next;
    }

    fn run(mut self, plan: &Plan, cancel: &CancelFlag) -> ExecutionResult {
        self.transition(ExecutionState::Running);
        let atomic = self.options.policy.atomic;
        let mut interrupted = false;

        for (index, operation) in plan.operations.iter().enumerate() {
            if cancel.is_cancelled() {
                let err = ExecutionError::new(
                    ExecutionErrorKind::Cancelled,
                    operation.path(),
                    "cancelled before this operation ran",
                );
                if atomic {
                    return self.fail(operation, err);
                }
                self.partial_failures.push(err);
                interrupted = true;
                break;
            }

            if let Err(err) = self.apply(index, operation) {
                tracing::warn!(%operation, error = %err, "operation failed");
                if atomic {
                    return self.fail(operation, err);
                }
                self.partial_failures.push(err);
            }
        }

        if self.options.verify && !interrupted {
            for (index, err) in self.verify() {
                if atomic {
                    return self.fail(&plan.operations[index], err);
                }
                self.partial_failures.push(err);
            }
        }

        self.commit()
    }

    fn apply(&mut self, index: usize, operation: &Operation) -> Result<(), ExecutionError> {
        match operation {
            Operation::CreateDirectory { path, mode }
            | Operation::CreateIntegrityDirectory { path, mode } => {
                self.create_directory(index, path, *mode)
            }
            Operation::SetOwner { path, owner } => {
                self.set_owner(path, owner);
                Ok(())
            }
        }
    }

    fn create_directory(&mut self, index: usize, path: &Path, mode: Mode) -> Result<(), ExecutionError> {
        let state = self.fs.probe(path).map_err(|err| ExecutionError::io(path, &err))?;
        match state {
            PathState::Missing => {}
            PathState::EmptyDirectory => {
                tracing::debug!(path = %path.display(), "directory already exists and is empty");
                self.reused.push(path.to_path_buf());
                return Ok(());
            }
            PathState::PopulatedDirectory if self.options.existing == ExistingPolicy::Reuse => {
                tracing::debug!(path = %path.display(), "reusing existing directory");
                self.reused.push(path.to_path_buf());
                return Ok(());
            }
            PathState::PopulatedDirectory => {
                return Err(ExecutionError::new(
                    ExecutionErrorKind::NotEmpty,
                    path,
                    "directory already exists and is not empty",
                ));
            }
            PathState::NotDirectory => {
                return Err(ExecutionError::new(
                    ExecutionErrorKind::PathConflict,
                    path,
                    "path exists and is not a directory",
                ));
            }
        }

        self.fs.create_dir(path).map_err(|err| ExecutionError::io(path, &err))?;
        self.undo_log.push(Created { path: path.to_path_buf(), mode, index });
        self.fs.set_mode(path, mode).map_err(|err| ExecutionError::io(path, &err))?;
        tracing::debug!(path = %path.display(), %mode, "created directory");
        Ok(())
    }

    fn set_owner(&mut self, path: &Path, owner: &str) {
        if !self.undo_log.iter().any(|created| created.path == path) {
            self.skip_owner(path, "directory was not created by this run".to_string());
            return;
        }
        match self.fs.set_owner(path, owner) {
            Ok(OwnershipOutcome::Applied) => {
                tracing::debug!(path = %path.display(), owner, "ownership applied");
            }
            Ok(OwnershipOutcome::Skipped(reason)) => self.skip_owner(path, reason),
            Err(err) => self.skip_owner(path, err.to_string()),
        }
    }

    fn skip_owner(&mut self, path: &Path, reason: String) {
        tracing::warn!(path = %path.display(), %reason, "ownership change skipped");
        self.ownership_skipped.push((path.to_path_buf(), reason));
    }

    /// Created directories that no longer match the plan, with their operation index.
    fn verify(&self) -> Vec<(usize, ExecutionError)> {
        let mut mismatches = Vec::new();
        for created in &self.undo_log {
            let path = &created.path;
            let result = match self.fs.probe(path) {
                Ok(PathState::EmptyDirectory | PathState::PopulatedDirectory) => {
                    match self.fs.mode(path) {
                        Ok(Some(actual)) if actual != created.mode => Err(format!(
                            "expected mode {} but found {}",
                            created.mode, actual
                        )),
                        Ok(_) => Ok(()),
                        Err(err) => Err(err.to_string()),
                    }
                }
                Ok(_) => Err("directory is missing after creation".to_string()),
                Err(err) => Err(err.to_string()),
            };
            if let Err(message) = result {
                mismatches.push((
                    created.index,
                    ExecutionError::new(ExecutionErrorKind::Verification, path, message),
                ));
            }
        }
        mismatches
    }

    fn fail(mut self, operation: &Operation, cause: ExecutionError) -> ExecutionResult {
        let mut removed = Vec::new();
        let mut leaked = Vec::new();

        if self.options.policy.rollback_on_failure {
            tracing::info!(entries = self.undo_log.len(), "rolling back scaffold");
            for created in self.undo_log.iter().rev() {
                match self.fs.remove_dir(&created.path) {
                    Ok(()) => removed.push(created.path.clone()),
                    Err(err) => {
                        tracing::error!(path = %created.path.display(), error = %err, "rollback could not remove directory");
                        leaked.push(RollbackError { path: created.path.clone(), message: err.to_string() });
                    }
                }
            }
        } else {
            leaked = self
                .undo_log
                .iter()
                .map(|created| RollbackError {
                    path: created.path.clone(),
                    message: "left in place because rollbackOnFailure is false".to_string(),
                })
                .collect();
        }

        let status =
            if leaked.is_empty() { ExecutionStatus::RolledBack } else { ExecutionStatus::PartiallyFailed };
        self.transition(status.into());

        let remaining: Vec<PathBuf> = self
            .undo_log
            .iter()
            .filter(|created| leaked.iter().any(|entry| entry.path == created.path))
            .map(|created| created.path.clone())
            .collect();

        ExecutionResult {
            status,
            created_paths: remaining,
            reused_paths: self.reused,
            failed_op: Some(operation.clone()),
            cause: Some(cause),
            removed_paths: removed,
            partial_failures: self.partial_failures,
            leaked_paths: leaked,
            ownership_skipped: self.ownership_skipped,
        }
    }

    fn commit(mut self) -> ExecutionResult {
        self.transition(ExecutionState::Committed);
        tracing::info!(
            created = self.undo_log.len(),
            reused = self.reused.len(),
            failures = self.partial_failures.len(),
            "scaffold committed"
        );

        ExecutionResult {
            status: ExecutionStatus::Committed,
            created_paths: self.undo_log.into_iter().map(|created| created.path).collect(),
            reused_paths: self.reused,
            failed_op: None,
            cause: None,
            removed_paths: Vec::new(),
            partial_failures: self.partial_failures,
            leaked_paths: Vec::new(),
            ownership_skipped: self.ownership_skipped,
        }
    }
}
