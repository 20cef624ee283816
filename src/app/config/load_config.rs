//! Engine configuration loading from `worldgen.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::config::{self, parse_config_content};
use crate::domain::{AppError, EngineConfig};

/// Engine settings plus where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadedConfig {
    pub config: EngineConfig,
    /// The file that was read, if any.
    pub source: Option<PathBuf>,
    /// `[catalog].worlds_dir` resolved against the config file's directory.
    pub worlds_dir: Option<PathBuf>,
}

/// Load engine settings.
///
/// An explicit path must exist. Without one, `worldgen.toml` in `working_dir`
/// is used when present, otherwise defaults apply.
pub fn load_config(explicit: Option<&Path>, working_dir: &Path) -> Result<LoadedConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            let path = if path.is_absolute() { path.to_path_buf() } else { working_dir.join(path) };
            if !path.is_file() {
                return Err(AppError::config_error(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path)
        }
        None => Some(config::paths::config(working_dir)).filter(|candidate| candidate.is_file()),
    };

    let Some(path) = path else {
        tracing::debug!(dir = %working_dir.display(), "no engine config found, using defaults");
        return Ok(LoadedConfig { config: EngineConfig::default(), source: None, worlds_dir: None });
    };

    let content = fs::read_to_string(&path)?;
    let config = parse_config_content(&content)?;
    let config_dir = path.parent().unwrap_or(working_dir);
    let worlds_dir =
        config.catalog.worlds_dir.as_deref().map(|setting| config::paths::worlds_dir(config_dir, setting));
    tracing::debug!(config = %path.display(), "loaded engine config");

    Ok(LoadedConfig { config, source: Some(path), worlds_dir })
}
