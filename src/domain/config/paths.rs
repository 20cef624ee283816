use std::path::{Path, PathBuf};

/// Engine config file looked up in the working directory.
pub const CONFIG_FILE: &str = "worldgen.toml";

/// `<dir>/worldgen.toml`
pub fn config(dir: &Path) -> PathBuf {
    dir.join(CONFIG_FILE)
}

/// Resolve a `worlds_dir` setting against the directory holding the config file.
pub fn worlds_dir(config_dir: &Path, setting: &Path) -> PathBuf {
    if setting.is_absolute() { setting.to_path_buf() } else { config_dir.join(setting) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn worlds_dir_is_relative_to_config() {
        assert_eq!(worlds_dir(Path::new("/etc/wg"), Path::new("worlds")), PathBuf::from("/etc/wg/worlds"));
        assert_eq!(worlds_dir(Path::new("/etc/wg"), Path::new("/srv/worlds")), PathBuf::from("/srv/worlds"));
    }
}
