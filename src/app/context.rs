use std::path::{Path, PathBuf};

use crate::domain::EngineConfig;
use crate::ports::{ScaffoldFilesystem, WorldCatalog};

/// Application context holding dependencies for command execution.
pub struct AppContext<F: ScaffoldFilesystem, C: WorldCatalog> {
    filesystem: F,
    catalog: C,
    config: EngineConfig,
    working_dir: PathBuf,
}

impl<F: ScaffoldFilesystem, C: WorldCatalog> AppContext<F, C> {
    /// Create a new application context.
    pub fn new(filesystem: F, catalog: C, config: EngineConfig, working_dir: PathBuf) -> Self {
        Self { filesystem, catalog, config, working_dir }
    }

    pub fn filesystem(&self) -> &F {
        &self.filesystem
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Directory relative paths are resolved against.
    pub fn working_dir(&self) -> &Path {
        &self.working_dir
    }

    /// `path` made absolute against the working directory.
    pub fn absolute(&self, path: &Path) -> PathBuf {
        if path.is_absolute() { path.to_path_buf() } else { self.working_dir.join(path) }
    }
}
