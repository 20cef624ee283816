//! World → ordered operation list.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::operation::{Operation, Plan};
use crate::domain::error::{PlanError, PlanErrorKind};
use crate::domain::identifiers::{contains_whitespace, is_safe_path_component};
use crate::domain::world::{PermissionClass, StructureNode, WorldConfig};

pub const DEFAULT_MAX_DEPTH: usize = 32;
pub const DEFAULT_INTEGRITY_DIR: &str = ".integrity";

/// Engine-level knobs that shape a plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannerOptions {
    /// Deepest structure-node nesting accepted; nodes directly under a parent are depth 1.
    pub max_depth: usize,
    /// Name of the reserved child created under integrity parents.
    pub integrity_dir: String,
    /// Emit `SetOwner` after each directory when `metadata.defaultOwner` is set.
    pub apply_ownership: bool,
}

impl Default for PlannerOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            integrity_dir: DEFAULT_INTEGRITY_DIR.to_string(),
            apply_ownership: false,
        }
    }
}

/// Derive the operation sequence for `world` under the absolute `root`.
///
/// Performs no I/O. Parents keep source order, each integrity parent is
/// followed by its reserved child, and structure nodes are visited
/// depth-first in sibling order.
pub fn plan(world: &WorldConfig, root: &Path, options: &PlannerOptions) -> Result<Plan, PlanError> {
    if !root.is_absolute() {
        return Err(PlanError::new(
            PlanErrorKind::RelativeRoot,
            root.display().to_string(),
            "scaffold root must be an absolute path",
        ));
    }

    let owner = options
        .apply_ownership
        .then(|| world.metadata.default_owner.clone())
        .flatten()
        .filter(|owner| !owner.trim().is_empty());

    let mut builder = PlanBuilder { world, options, owner, seen: HashSet::new(), operations: Vec::new() };

    for parent in &world.parent_directories {
        if contains_whitespace(&parent.name) {
            return Err(PlanError::new(
                PlanErrorKind::InvalidName,
                root.join(&parent.name).display().to_string(),
                format!("parent directory name '{}' must not contain whitespace", parent.name),
            ));
        }
        let parent_path = builder.child_path(root, &parent.name)?;
        builder.create(parent_path.clone(), PermissionClass::Default)?;

        if parent.integrity {
            let integrity_path = builder.child_path(&parent_path, &options.integrity_dir)?;
            builder.create(integrity_path, PermissionClass::Integrity)?;
        }

        for group in world.groups_for(&parent.name) {
            builder.nodes(&group.structure, &parent_path, 1)?;
        }
    }

    tracing::debug!(
        root = %root.display(),
        operations = builder.operations.len(),
        "planned scaffold"
    );

    Ok(Plan { root: root.to_path_buf(), operations: builder.operations, permissions: world.permissions })
}

struct PlanBuilder<'a> {
    world: &'a WorldConfig,
    options: &'a PlannerOptions,
    owner: Option<String>,
    seen: HashSet<PathBuf>,
    operations: Vec<Operation>,
}

impl PlanBuilder<'_> {
    fn nodes(&mut self, nodes: &[StructureNode], base: &Path, depth: usize) -> Result<(), PlanError> {
        for node in nodes {
            let path = self.child_path(base, &node.name)?;
            if depth > self.options.max_depth {
                return Err(PlanError::new(
                    PlanErrorKind::TooDeep,
                    path.display().to_string(),
                    format!("structure nesting exceeds the maximum depth of {}", self.options.max_depth),
                ));
            }
            self.create(path.clone(), PermissionClass::Default)?;
            self.nodes(&node.children, &path, depth + 1)?;
        }
        Ok(())
    }

    fn child_path(&self, base: &Path, name: &str) -> Result<PathBuf, PlanError> {
        if !is_safe_path_component(name) {
            return Err(PlanError::new(
                PlanErrorKind::InvalidName,
                base.join(name).display().to_string(),
                format!("'{}' must be a single path component (no separators, '.' or '..')", name),
            ));
        }
        Ok(base.join(name))
    }

    fn create(&mut self, path: PathBuf, class: PermissionClass) -> Result<(), PlanError> {
        if !self.seen.insert(path.clone()) {
            return Err(PlanError::new(
                PlanErrorKind::DuplicatePath,
                path.display().to_string(),
                "more than one entry resolves to this directory",
            ));
        }

        let mode = self.world.permissions.directory_mode(class);
        let operation = match class {
            PermissionClass::Default => Operation::CreateDirectory { path: path.clone(), mode },
            PermissionClass::Integrity => Operation::CreateIntegrityDirectory { path: path.clone(), mode },
        };
        tracing::trace!(%operation, "plan step");
        self.operations.push(operation);

        if let Some(owner) = &self.owner {
            self.operations.push(Operation::SetOwner { path, owner: owner.clone() });
        }
        Ok(())
    }
}
