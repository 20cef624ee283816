//! World catalog port definition.

use std::fmt;
use std::path::PathBuf;

use serde::{Serialize, Serializer};

use crate::domain::AppError;

/// Where a world config came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorldOrigin {
    /// Embedded in the binary.
    BuiltIn,
    /// A file in the configured worlds directory.
    Catalog(PathBuf),
    /// A file named directly on the command line.
    File(PathBuf),
}

impl fmt::Display for WorldOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WorldOrigin::BuiltIn => f.write_str("built-in"),
            WorldOrigin::Catalog(path) | WorldOrigin::File(path) => write!(f, "{}", path.display()),
        }
    }
}

impl Serialize for WorldOrigin {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Raw YAML text of a named world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WorldDocument {
    pub name: String,
    pub origin: WorldOrigin,
    pub content: String,
}

/// One listed world: its text, or the reason it could not be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogEntry {
    Readable(WorldDocument),
    Unreadable { name: String, origin: WorldOrigin, error: String },
}

impl CatalogEntry {
    pub fn name(&self) -> &str {
        match self {
            CatalogEntry::Readable(document) => &document.name,
            CatalogEntry::Unreadable { name, .. } => name,
        }
    }
}

/// Trait for looking up named world configs.
pub trait WorldCatalog {
    /// Load a world by name. Catalog entries shadow built-ins.
    fn get(&self, name: &str) -> Result<Option<WorldDocument>, AppError>;

    /// List all available worlds sorted by name.
    ///
    /// A file that cannot be read is listed as `Unreadable` rather than failing the listing.
    fn list_all(&self) -> Result<Vec<CatalogEntry>, AppError>;
}
