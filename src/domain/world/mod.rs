//! World config domain: typed schema, permission modes, and validation.

pub mod model;
pub mod permissions;
pub mod validate;

pub use model::{
    CREATION_METHOD, CREATION_TEMPLATE, CreationConfig, FOLDER_NODE_TYPE, NodeType, ParentDir,
    ProjectScope, ScaffoldType, StructureNode, SubdirGroup, WorldConfig, WorldMetadata,
};
pub use permissions::{Mode, PermissionClass, PermissionSet};
pub use validate::validate;
