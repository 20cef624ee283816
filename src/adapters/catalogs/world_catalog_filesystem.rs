//! `WorldCatalog` backed by a worlds directory plus the built-in templates.

use std::fs;
use std::path::PathBuf;

use super::builtin_worlds::{builtin_world, builtin_worlds, world_name};
use crate::domain::AppError;
use crate::domain::identifiers::is_safe_path_component;
use crate::ports::{CatalogEntry, WorldCatalog, WorldDocument, WorldOrigin};

/// Catalog that searches `worlds_dir` first, then the built-ins.
#[derive(Debug, Clone, Default)]
pub struct FilesystemWorldCatalog {
    worlds_dir: Option<PathBuf>,
}

impl FilesystemWorldCatalog {
    pub fn new(worlds_dir: Option<PathBuf>) -> Self {
        Self { worlds_dir }
    }

    /// Catalog with only the built-in templates.
    pub fn builtin_only() -> Self {
        Self::default()
    }

    fn catalog_entries(&self) -> Result<Vec<CatalogEntry>, AppError> {
        let Some(dir) = &self.worlds_dir else {
            return Ok(Vec::new());
        };
        if !dir.is_dir() {
            tracing::debug!(dir = %dir.display(), "worlds directory not present");
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            let Some(name) = path.file_name().and_then(|n| n.to_str()).and_then(world_name) else {
                continue;
            };
            let origin = WorldOrigin::Catalog(path.clone());
            entries.push(match fs::read_to_string(&path) {
                Ok(content) => CatalogEntry::Readable(WorldDocument { name, origin, content }),
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "cannot read catalog entry");
                    CatalogEntry::Unreadable { name, origin, error: err.to_string() }
                }
            });
        }
        Ok(entries)
    }
}

impl WorldCatalog for FilesystemWorldCatalog {
    fn get(&self, name: &str) -> Result<Option<WorldDocument>, AppError> {
        if !is_safe_path_component(name) {
            return Ok(None);
        }
        if let Some(dir) = &self.worlds_dir {
            for extension in ["yaml", "yml"] {
                let path = dir.join(format!("{}.{}", name, extension));
                if path.is_file() {
                    let content = fs::read_to_string(&path)?;
                    return Ok(Some(WorldDocument {
                        name: name.to_string(),
                        origin: WorldOrigin::Catalog(path),
                        content,
                    }));
                }
            }
        }
        Ok(builtin_world(name))
    }

    fn list_all(&self) -> Result<Vec<CatalogEntry>, AppError> {
        let mut entries = self.catalog_entries()?;
        for builtin in builtin_worlds() {
            if !entries.iter().any(|entry| entry.name() == builtin.name) {
                entries.push(CatalogEntry::Readable(builtin));
            }
        }
        entries.sort_by(|a, b| a.name().cmp(b.name()));
        entries.dedup_by(|a, b| a.name() == b.name());
        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;

    use super::*;

    #[test]
    fn builtin_only_catalog_finds_templates() {
        let catalog = FilesystemWorldCatalog::builtin_only();

        let world = catalog.get("study").unwrap().unwrap();
        assert_eq!(world.origin, WorldOrigin::BuiltIn);
        assert!(catalog.get("nonexistent").unwrap().is_none());
        assert!(catalog.get("../etc/passwd").unwrap().is_none());
    }

    #[test]
    fn catalog_entries_shadow_builtins() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("study.yaml").write_str("worldType: CUSTOM_STUDY\n").unwrap();
        temp.child("lab.yml").write_str("worldType: LAB\n").unwrap();
        temp.child("README.md").write_str("ignored").unwrap();

        let catalog = FilesystemWorldCatalog::new(Some(temp.path().to_path_buf()));

        let study = catalog.get("study").unwrap().unwrap();
        assert!(study.content.contains("CUSTOM_STUDY"));
        assert!(matches!(study.origin, WorldOrigin::Catalog(_)));

        let entries = catalog.list_all().unwrap();
        let names: Vec<&str> = entries.iter().map(CatalogEntry::name).collect();
        assert_eq!(names, vec!["lab", "project", "study", "world"]);
    }

    #[test]
    fn unreadable_file_is_listed_not_fatal() {
        let temp = assert_fs::TempDir::new().unwrap();
        temp.child("lab.yaml").write_str("worldType: LAB\n").unwrap();
        temp.child("bad.yaml").write_binary(&[0xff, 0xfe, 0x00, 0x80]).unwrap();

        let catalog = FilesystemWorldCatalog::new(Some(temp.path().to_path_buf()));
        let entries = catalog.list_all().unwrap();

        let names: Vec<&str> = entries.iter().map(CatalogEntry::name).collect();
        assert_eq!(names, vec!["bad", "lab", "project", "study", "world"]);
        assert!(matches!(&entries[0], CatalogEntry::Unreadable { error, .. } if !error.is_empty()));
        assert!(matches!(&entries[1], CatalogEntry::Readable(document) if document.content.contains("LAB")));
    }

    #[test]
    fn missing_worlds_dir_is_not_an_error() {
        let catalog = FilesystemWorldCatalog::new(Some(PathBuf::from("/nonexistent/worlds")));
        assert_eq!(catalog.list_all().unwrap().len(), 3);
    }
}
