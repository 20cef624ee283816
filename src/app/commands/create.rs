//! Full pipeline: validate, resolve, plan, and execute a world.

use serde::Serialize;

use super::plan::{self, PlanOutcome, ScaffoldInputs};
use crate::app::AppContext;
use crate::app::services::transaction::{self, CancelFlag, ExecutorOptions};
use crate::domain::{AppError, ExecutionResult};
use crate::ports::{PathState, ScaffoldFilesystem, WorldCatalog};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOutcome {
    #[serde(flatten)]
    pub planned: PlanOutcome,
    pub result: ExecutionResult,
}

impl CreateOutcome {
    pub fn exit_code(&self) -> i32 {
        self.result.exit_code()
    }
}

pub fn execute<F: ScaffoldFilesystem, C: WorldCatalog>(
    ctx: &AppContext<F, C>,
    reference: &str,
    inputs: &ScaffoldInputs,
    cancel: &CancelFlag,
) -> Result<CreateOutcome, AppError> {
    let planned = plan::execute(ctx, reference, inputs)?;
    let root = &planned.plan.root;

    match ctx.filesystem().probe(root)? {
        PathState::EmptyDirectory | PathState::PopulatedDirectory => {}
        PathState::Missing | PathState::NotDirectory => {
            return Err(AppError::InvalidPath(format!(
                "scaffold root {} does not exist or is not a directory",
                root.display()
            )));
        }
    }

    let options = ExecutorOptions {
        policy: planned.world.config.policy(),
        existing: ctx.config().engine.existing,
        verify: true,
    };
    let result = transaction::execute(ctx.filesystem(), &planned.plan, &options, cancel);

    Ok(CreateOutcome { planned, result })
}

#[cfg(test)]
mod tests {
    use std::path::{Path, PathBuf};

    use assert_fs::TempDir;
    use assert_fs::prelude::*;
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::adapters::FilesystemWorldCatalog;
    use crate::domain::{EngineConfig, ExecutionStatus, ExistingPolicy, Mode};
    use crate::testing::{MINIMAL_WORLD, MemoryFilesystem};

    fn context(
        dir: &TempDir,
        fs: MemoryFilesystem,
        config: EngineConfig,
    ) -> AppContext<MemoryFilesystem, FilesystemWorldCatalog> {
        AppContext::new(fs, FilesystemWorldCatalog::builtin_only(), config, dir.path().to_path_buf())
    }

    fn inputs() -> ScaffoldInputs {
        ScaffoldInputs {
            root: PathBuf::from("/ws"),
            now: Utc.with_ymd_and_hms(2025, 12, 23, 14, 30, 45).unwrap(),
            user: "martin".into(),
        }
    }

    #[test]
    fn creates_the_scenario_tree() {
        let temp = TempDir::new().unwrap();
        temp.child("lab.yaml").write_str(MINIMAL_WORLD).unwrap();
        let fs = MemoryFilesystem::with_root("/ws");
        let ctx = context(&temp, fs.clone(), EngineConfig::default());

        let outcome = execute(&ctx, "lab.yaml", &inputs(), &CancelFlag::new()).unwrap();

        assert_eq!(outcome.result.status, ExecutionStatus::Committed);
        assert_eq!(outcome.exit_code(), 0);
        assert_eq!(
            outcome.result.created_paths,
            vec![
                PathBuf::from("/ws/00_admin"),
                PathBuf::from("/ws/00_admin/.integrity"),
                PathBuf::from("/ws/01_data"),
            ]
        );
        assert_eq!(fs.mode_of("/ws/00_admin/.integrity"), Some(Mode::INTEGRITY_DIRECTORY));
    }

    #[test]
    fn conflicting_file_rolls_back() {
        let temp = TempDir::new().unwrap();
        temp.child("lab.yaml").write_str(MINIMAL_WORLD).unwrap();
        let fs = MemoryFilesystem::with_root("/ws");
        fs.add_file("/ws/01_data");
        let ctx = context(&temp, fs.clone(), EngineConfig::default());

        let outcome = execute(&ctx, "lab.yaml", &inputs(), &CancelFlag::new()).unwrap();

        assert_eq!(outcome.result.status, ExecutionStatus::RolledBack);
        assert_eq!(outcome.exit_code(), 4);
        assert_eq!(
            outcome.result.failed_op.as_ref().map(|op| op.path()),
            Some(Path::new("/ws/01_data"))
        );
        assert!(!fs.is_dir("/ws/00_admin"));
    }

    #[test]
    fn missing_root_fails_before_any_operation() {
        let temp = TempDir::new().unwrap();
        let fs = MemoryFilesystem::default();
        let ctx = context(&temp, fs.clone(), EngineConfig::default());

        let err = execute(&ctx, "world", &inputs(), &CancelFlag::new()).unwrap_err();

        assert!(matches!(err, AppError::InvalidPath(_)));
        assert!(fs.dirs().is_empty());
    }

    #[test]
    fn reuse_policy_comes_from_engine_config() {
        let temp = TempDir::new().unwrap();
        let fs = MemoryFilesystem::with_root("/ws");
        fs.add_dir("/ws/01_inbox");
        fs.add_file("/ws/01_inbox/todo.txt");

        let ctx = context(&temp, fs.clone(), EngineConfig::default());
        let outcome = execute(&ctx, "world", &inputs(), &CancelFlag::new()).unwrap();
        assert_eq!(outcome.result.status, ExecutionStatus::RolledBack);

        let mut config = EngineConfig::default();
        config.engine.existing = ExistingPolicy::Reuse;
        let ctx = context(&temp, fs.clone(), config);
        let outcome = execute(&ctx, "world", &inputs(), &CancelFlag::new()).unwrap();
        assert_eq!(outcome.result.status, ExecutionStatus::Committed);
        assert_eq!(outcome.result.reused_paths, vec![PathBuf::from("/ws/01_inbox")]);
    }

    #[test]
    fn non_atomic_world_keeps_going() {
        let temp = TempDir::new().unwrap();
        temp.child("lab.yaml")
            .write_str(&MINIMAL_WORLD.replace("atomicTransactions: true", "atomicTransactions: false"))
            .unwrap();
        let fs = MemoryFilesystem::with_root("/ws");
        fs.fail_create_at("/ws/00_admin");
        let ctx = context(&temp, fs.clone(), EngineConfig::default());

        let outcome = execute(&ctx, "lab.yaml", &inputs(), &CancelFlag::new()).unwrap();

        assert_eq!(outcome.result.status, ExecutionStatus::Committed);
        assert_eq!(outcome.result.partial_failures.len(), 2);
        assert_eq!(outcome.exit_code(), 4);
        assert!(fs.is_dir("/ws/01_data"));
    }
}
