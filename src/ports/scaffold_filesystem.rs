//! Filesystem operations the transactional executor needs.
//!
//! All paths are absolute. Methods map one-to-one onto single syscalls so the
//! executor can track exactly what it created.

use std::io;
use std::path::Path;

use crate::domain::Mode;

/// What currently occupies a planned path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathState {
    Missing,
    EmptyDirectory,
    PopulatedDirectory,
    /// A file, symlink, or other non-directory entry.
    NotDirectory,
}

/// Result of a best-effort ownership change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OwnershipOutcome {
    Applied,
    Skipped(String),
}

/// Port for directory creation, permission, and removal.
pub trait ScaffoldFilesystem {
    /// Inspect the entry at `path` without following symlinks.
    fn probe(&self, path: &Path) -> io::Result<PathState>;

    /// Create exactly one directory. The parent must already exist.
    fn create_dir(&self, path: &Path) -> io::Result<()>;

    /// Apply `mode` explicitly, independent of the process umask.
    fn set_mode(&self, path: &Path, mode: Mode) -> io::Result<()>;

    /// Current permission bits, or `None` where the platform has none.
    fn mode(&self, path: &Path) -> io::Result<Option<Mode>>;

    /// Change ownership if the platform and `owner` allow it.
    fn set_owner(&self, path: &Path, owner: &str) -> io::Result<OwnershipOutcome>;

    /// Remove one empty directory.
    fn remove_dir(&self, path: &Path) -> io::Result<()>;
}
