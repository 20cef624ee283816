//! Typed world config produced by the schema validator.

use std::fmt;

use serde::Serialize;

use super::permissions::PermissionSet;
use crate::domain::execution::ExecutionPolicy;

/// Sentinel every world config must name in `metadata.creationTemplate`.
pub const CREATION_TEMPLATE: &str = "world.yaml.template";

/// The only supported `config.creationMethod`.
pub const CREATION_METHOD: &str = "template";

/// The only supported structure node `type`.
pub const FOLDER_NODE_TYPE: &str = "folder";

/// Root entity: one validated world description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldConfig {
    pub world_type: String,
    pub description: String,
    pub metadata: WorldMetadata,
    pub config: CreationConfig,
    pub parent_directories: Vec<ParentDir>,
    pub subdirectories: Vec<SubdirGroup>,
    pub permissions: PermissionSet,
}

impl WorldConfig {
    /// Subdirectory groups targeting `parent`, in source order.
    pub fn groups_for<'a>(&'a self, parent: &'a str) -> impl Iterator<Item = &'a SubdirGroup> {
        self.subdirectories.iter().filter(move |group| group.parent == parent)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorldMetadata {
    pub version: String,
    pub constitution_version: String,
    pub created: Option<String>,
    pub author: Option<String>,
    pub default_owner: Option<String>,
    pub creation_template: String,
    pub integrity_required: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreationConfig {
    pub creation_method: String,
    pub scaffold_type: ScaffoldType,
    pub atomic_transactions: bool,
    pub rollback_on_failure: bool,
}

impl CreationConfig {
    pub fn policy(&self) -> ExecutionPolicy {
        ExecutionPolicy { atomic: self.atomic_transactions, rollback_on_failure: self.rollback_on_failure }
    }
}

/// Kind of scaffold a world describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaffoldType {
    World,
    Project,
    Study,
}

impl ScaffoldType {
    pub const ALL: [ScaffoldType; 3] = [ScaffoldType::World, ScaffoldType::Project, ScaffoldType::Study];

    pub fn as_str(&self) -> &'static str {
        match self {
            ScaffoldType::World => "world",
            ScaffoldType::Project => "project",
            ScaffoldType::Study => "study",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == value)
    }
}

impl fmt::Display for ScaffoldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a parent directory belongs to the world or to a single project.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProjectScope {
    #[default]
    World,
    Project,
}

impl ProjectScope {
    pub const ALL: [ProjectScope; 2] = [ProjectScope::World, ProjectScope::Project];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectScope::World => "world",
            ProjectScope::Project => "project",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|scope| scope.as_str() == value)
    }
}

/// Top-level folder created directly under the world root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentDir {
    pub name: String,
    pub description: String,
    pub integrity: bool,
    pub project_scope: ProjectScope,
}

/// Nested structure attached to one parent directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubdirGroup {
    pub parent: String,
    pub description: Option<String>,
    pub structure: Vec<StructureNode>,
}

/// Structure node kinds. Only folders exist today.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Folder,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StructureNode {
    pub name: String,
    #[serde(rename = "type")]
    pub node_type: NodeType,
    pub description: String,
    pub children: Vec<StructureNode>,
}
