use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::domain::world::{Mode, PermissionClass, PermissionSet};

/// One filesystem step of a scaffold plan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Operation {
    CreateDirectory { path: PathBuf, mode: Mode },
    /// Same effect as `CreateDirectory`, restricted to the integrity mode class.
    CreateIntegrityDirectory { path: PathBuf, mode: Mode },
    /// Best-effort ownership change; never fails a run.
    SetOwner { path: PathBuf, owner: String },
}

impl Operation {
    pub fn path(&self) -> &Path {
        match self {
            Operation::CreateDirectory { path, .. }
            | Operation::CreateIntegrityDirectory { path, .. }
            | Operation::SetOwner { path, .. } => path,
        }
    }

    /// Mode applied after creation, for directory operations.
    pub fn mode(&self) -> Option<Mode> {
        match self {
            Operation::CreateDirectory { mode, .. }
            | Operation::CreateIntegrityDirectory { mode, .. } => Some(*mode),
            Operation::SetOwner { .. } => None,
        }
    }

    pub fn permission_class(&self) -> Option<PermissionClass> {
        match self {
            Operation::CreateDirectory { .. } => Some(PermissionClass::Default),
            Operation::CreateIntegrityDirectory { .. } => Some(PermissionClass::Integrity),
            Operation::SetOwner { .. } => None,
        }
    }

    pub fn is_create(&self) -> bool {
        self.mode().is_some()
    }

    fn kind(&self) -> &'static str {
        match self {
            Operation::CreateDirectory { .. } => "create_directory",
            Operation::CreateIntegrityDirectory { .. } => "create_integrity_directory",
            Operation::SetOwner { .. } => "set_owner",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::SetOwner { path, owner } => {
                write!(f, "{} {} {}", self.kind(), path.display(), owner)
            }
            Operation::CreateDirectory { path, mode }
            | Operation::CreateIntegrityDirectory { path, mode } => {
                write!(f, "{} {} {}", self.kind(), path.display(), mode)
            }
        }
    }
}

/// An ordered operation list rooted at one absolute path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    pub root: PathBuf,
    pub operations: Vec<Operation>,
    /// Carried for future file nodes; directories only use the directory modes.
    pub permissions: PermissionSet,
}

impl Plan {
    pub fn len(&self) -> usize {
        self.operations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.operations.is_empty()
    }

    /// Paths the plan creates, in execution order.
    pub fn directories(&self) -> Vec<&Path> {
        self.operations.iter().filter(|op| op.is_create()).map(Operation::path).collect()
    }

    /// SHA-256 over the rendered operation sequence.
    ///
    /// Equal digests mean byte-identical plans, order included.
    pub fn digest(&self) -> String {
        let mut hasher = Sha256::new();
        hasher.update(self.root.to_string_lossy().as_bytes());
        hasher.update(b"\n");
        for operation in &self.operations {
            hasher.update(operation.to_string().as_bytes());
            hasher.update(b"\n");
        }
        let digest = hasher.finalize();
        digest.iter().map(|byte| format!("{:02x}", byte)).collect()
    }
}
