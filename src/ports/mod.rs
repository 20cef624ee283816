mod scaffold_filesystem;
mod world_catalog;

pub use scaffold_filesystem::{OwnershipOutcome, PathState, ScaffoldFilesystem};
pub use world_catalog::{CatalogEntry, WorldCatalog, WorldDocument, WorldOrigin};
