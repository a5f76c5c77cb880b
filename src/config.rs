use serde::Deserialize;
use std::path::{Path, PathBuf};
use directories::{BaseDirs, ProjectDirs};
use std::fs;

use crate::error::ConfigError;

pub const APP_NAME: &str = "powermenu";
const CONFIG_FILE: &str = "config.toml";

#[derive(Deserialize, Debug, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub icons: IconConfig,
}

#[derive(Deserialize, Debug, Clone, Default)]
pub struct GeneralConfig {
    /// Directory holding `desktops.json` and `entries/`.
    #[serde(default)]
    pub data_dir: Option<PathBuf>,
    /// Skips detection. `""` or `"none"` disables desktop overlays.
    #[serde(default)]
    pub desktop: Option<String>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct IconConfig {
    #[serde(default = "default_icon_size")]
    pub size: u32,
    #[serde(default = "default_themes")]
    pub themes: Vec<String>,
    #[serde(default)]
    pub search_paths: Vec<PathBuf>,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
}

fn default_icon_size() -> u32 { 32 }
fn default_themes() -> Vec<String> {
    vec!["hicolor".to_string(), "Adwaita".to_string(), "breeze".to_string()]
}
fn default_extensions() -> Vec<String> {
    vec!["svg".to_string(), "png".to_string(), "xpm".to_string()]
}

impl Default for IconConfig {
    fn default() -> Self {
        Self {
            size: default_icon_size(),
            themes: default_themes(),
            search_paths: Vec::new(),
            extensions: default_extensions(),
        }
    }
}

/// Where user overrides and `config.toml` live.
pub fn user_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("org", APP_NAME, APP_NAME).map(|dirs| dirs.config_dir().to_path_buf())
}

pub fn load_config() -> Result<Config, ConfigError> {
    match user_config_dir() {
        Some(dir) => load_config_from(&dir.join(CONFIG_FILE)),
        None => Ok(Config::default()),
    }
}

pub fn load_config_from(config_path: &Path) -> Result<Config, ConfigError> {
    if !config_path.exists() {
        return Ok(Config::default());
    }

    let content = fs::read_to_string(config_path).map_err(|source| ConfigError::Io {
        path: config_path.to_path_buf(),
        source,
    })?;
    toml::from_str(&content).map_err(|source| ConfigError::Toml {
        path: config_path.to_path_buf(),
        source,
    })
}

/// First existing bundled data directory: explicit choices, then the
/// install locations, then the copy next to the sources.
pub fn bundled_data_dir(cli: Option<&Path>, config: &Config) -> PathBuf {
    if let Some(dir) = cli.or(config.general.data_dir.as_deref()) {
        return dir.to_path_buf();
    }

    let mut candidates = Vec::new();
    if let Some(base_dirs) = BaseDirs::new() {
        candidates.push(base_dirs.data_dir().join(APP_NAME));
    }
    candidates.push(Path::new("/usr/local/share").join(APP_NAME));
    candidates.push(Path::new("/usr/share").join(APP_NAME));

    candidates
        .into_iter()
        .find(|dir| dir.is_dir())
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_config_uses_defaults() {
        let dir = tempdir().unwrap();
        let config = load_config_from(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.icons.size, 32);
        assert!(config.general.desktop.is_none());
    }

    #[test]
    fn sparse_config_keeps_other_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[general]\ndesktop = \"xfce\"\n\n[icons]\nsize = 48\n").unwrap();
        let config = load_config_from(&path).unwrap();
        assert_eq!(config.general.desktop.as_deref(), Some("xfce"));
        assert_eq!(config.icons.size, 48);
        assert_eq!(config.icons.extensions, default_extensions());
    }

    #[test]
    fn malformed_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        fs::write(&path, "[icons\nsize = ").unwrap();
        assert!(matches!(load_config_from(&path), Err(ConfigError::Toml { .. })));
    }

    #[test]
    fn explicit_data_dir_wins() {
        let mut config = Config::default();
        config.general.data_dir = Some(PathBuf::from("/from/config"));
        assert_eq!(bundled_data_dir(None, &config), PathBuf::from("/from/config"));
        assert_eq!(
            bundled_data_dir(Some(Path::new("/from/cli")), &config),
            PathBuf::from("/from/cli")
        );
    }
}
