//! Shared testing utilities for worldgen CLI tests.

use assert_cmd::Command;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Smallest valid world: `00_admin` (integrity) and `01_data`.
#[allow(dead_code)]
pub const MINIMAL_WORLD: &str = r#"worldType: RESEARCH_WORLD
description: "Built on ${DATE} by ${USER}"
metadata:
  version: "1.0.22"
  constitutionVersion: "1.0.22"
  creationTemplate: world.yaml.template
  integrityRequired: true
config:
  creationMethod: template
  scaffoldType: world
parentDirectories:
  - name: "00_admin"
    integrity: true
  - name: "01_data"
subdirectories:
  - parent: "01_data"
    structure:
      - name: raw
        type: folder
permissions:
  defaultDirectory: "0755"
  defaultFile: "0644"
  integrityDirectory: "0700"
  integrityFile: "0600"
"#;

/// Testing harness providing an isolated environment for CLI exercises.
#[allow(dead_code)]
pub struct TestContext {
    root: TempDir,
    work_dir: PathBuf,
}

#[allow(dead_code)]
impl TestContext {
    /// Create a new isolated environment.
    pub fn new() -> Self {
        let root = TempDir::new().expect("Failed to create temp directory for tests");
        let work_dir = root.path().join("work");
        fs::create_dir_all(&work_dir).expect("Failed to create test work directory");
        Self { root, work_dir }
    }

    /// Directory CLI invocations run in.
    pub fn work_dir(&self) -> &Path {
        &self.work_dir
    }

    /// Build a command for invoking the compiled `worldgen` binary in the work directory.
    pub fn cli(&self) -> Command {
        let mut cmd = Command::cargo_bin("worldgen").expect("Failed to locate worldgen binary");
        cmd.current_dir(&self.work_dir).env("USER", "martin").env_remove("RUST_LOG");
        cmd
    }

    /// Write a file relative to the work directory, creating parents.
    pub fn write(&self, relative: &str, content: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        fs::write(&path, content).expect("Failed to write test file");
        path
    }

    /// Create an empty scaffold root under the work directory.
    pub fn scaffold_root(&self, relative: &str) -> PathBuf {
        let path = self.work_dir.join(relative);
        fs::create_dir_all(&path).expect("Failed to create scaffold root");
        path
    }

    pub fn assert_dir(&self, path: &Path) {
        assert!(path.is_dir(), "{} should be a directory", path.display());
    }

    pub fn assert_missing(&self, path: &Path) {
        assert!(!path.exists(), "{} should not exist", path.display());
    }

    /// Permission bits of `path` (Unix only).
    #[cfg(unix)]
    pub fn mode(&self, path: &Path) -> u32 {
        use std::os::unix::fs::PermissionsExt;
        fs::metadata(path).expect("Failed to stat path").permissions().mode() & 0o777
    }
}
