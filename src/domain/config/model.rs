use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::Deserialize;

use crate::domain::AppError;
use crate::domain::execution::ExistingPolicy;
use crate::domain::identifiers::{is_safe_path_component, is_variable_name};
use crate::domain::plan::{DEFAULT_INTEGRITY_DIR, DEFAULT_MAX_DEPTH, PlannerOptions};

/// Schema version this engine accepts by default.
pub const SCHEMA_VERSION: &str = "1.0.22";

/// Engine configuration (`worldgen.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    #[serde(default)]
    pub engine: EngineSection,
    #[serde(default)]
    pub catalog: CatalogSection,
    /// Extra `${NAME}` substitutions. Built-in variables take precedence.
    #[serde(default)]
    pub variables: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    pub schema_version: String,
    pub max_depth: usize,
    pub integrity_dir: String,
    pub existing: ExistingPolicy,
    pub apply_ownership: bool,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION.to_string(),
            max_depth: DEFAULT_MAX_DEPTH,
            integrity_dir: DEFAULT_INTEGRITY_DIR.to_string(),
            existing: ExistingPolicy::default(),
            apply_ownership: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CatalogSection {
    /// Directory of user world configs, relative to the config file.
    pub worlds_dir: Option<PathBuf>,
}

impl EngineConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.engine.schema_version.trim().is_empty() {
            return Err(AppError::config_error("engine.schema_version must not be empty"));
        }
        if self.engine.max_depth == 0 {
            return Err(AppError::config_error("engine.max_depth must be at least 1"));
        }
        if !is_safe_path_component(&self.engine.integrity_dir) {
            return Err(AppError::config_error(format!(
                "engine.integrity_dir '{}' must be a single path component",
                self.engine.integrity_dir
            )));
        }
        if let Some(name) = self.variables.keys().find(|name| !is_variable_name(name)) {
            return Err(AppError::config_error(format!("Invalid variable name '{}'", name)));
        }
        Ok(())
    }

    pub fn planner_options(&self) -> PlannerOptions {
        PlannerOptions {
            max_depth: self.engine.max_depth,
            integrity_dir: self.engine.integrity_dir.clone(),
            apply_ownership: self.engine.apply_ownership,
        }
    }
}
