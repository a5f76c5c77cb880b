use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::config::IconConfig;

/// Maps an icon name to a file on disk.
pub trait IconResolver {
    fn resolve(&self, icon_name: &str) -> Option<PathBuf>;
}

/// Looks icons up in freedesktop-style theme directories.
pub struct ThemeIconResolver {
    icon_theme_paths: Vec<PathBuf>,
    themes: Vec<String>,
    size: u32,
    extensions: Vec<String>,
}

impl ThemeIconResolver {
    pub fn new(config: &IconConfig) -> Self {
        let mut paths = config.search_paths.clone();
        if let Some(home) = directories::BaseDirs::new() {
            paths.push(home.data_dir().join("icons"));
            paths.push(home.home_dir().join(".icons"));
        }
        paths.push(PathBuf::from("/usr/local/share/icons"));
        paths.push(PathBuf::from("/usr/share/icons"));
        paths.push(PathBuf::from("/usr/share/pixmaps"));
        Self::with_paths(paths, config)
    }

    pub fn with_paths(icon_theme_paths: Vec<PathBuf>, config: &IconConfig) -> Self {
        Self {
            icon_theme_paths,
            themes: config.themes.clone(),
            size: config.size,
            extensions: config.extensions.clone(),
        }
    }

    fn find(&self, icon_name: &str) -> Option<PathBuf> {
        for root in &self.icon_theme_paths {
            if !root.exists() {
                continue;
            }
            for theme in &self.themes {
                if let Some(path) = self.find_in_theme(&root.join(theme), icon_name) {
                    return Some(path);
                }
            }
            // Unthemed roots such as /usr/share/pixmaps.
            for ext in &self.extensions {
                let file_path = root.join(format!("{}.{}", icon_name, ext));
                if file_path.is_file() {
                    return Some(file_path);
                }
            }
        }
        None
    }

    /// Prefers the configured size, then scalable, then anything else.
    fn find_in_theme(&self, theme_dir: &Path, icon_name: &str) -> Option<PathBuf> {
        if !theme_dir.is_dir() {
            return None;
        }
        let wanted: Vec<String> = self
            .extensions
            .iter()
            .map(|ext| format!("{}.{}", icon_name, ext))
            .collect();
        let sized = format!("{}x{}", self.size, self.size);

        let mut candidates: Vec<PathBuf> = WalkDir::new(theme_dir)
            .max_depth(3)
            .sort_by_file_name()
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter(|e| {
                e.file_name()
                    .to_str()
                    .is_some_and(|name| wanted.iter().any(|w| w == name))
            })
            .map(|e| e.into_path())
            .collect();

        let rank = |path: &Path| {
            let text = path.strip_prefix(theme_dir).unwrap_or(path).to_string_lossy();
            if text.contains(&sized) {
                0
            } else if text.contains("scalable") {
                1
            } else {
                2
            }
        };
        candidates.sort_by_key(|p| rank(p));
        candidates.into_iter().next()
    }
}

/// `a-b-c`, then `a-b`, then `a`.
fn generic_fallbacks(icon_name: &str) -> impl Iterator<Item = &str> {
    std::iter::successors(Some(icon_name), |name| {
        let name: &str = *name;
        name.rfind('-').map(|i| &name[..i])
    })
    .filter(|name| !name.is_empty())
}

impl IconResolver for ThemeIconResolver {
    fn resolve(&self, icon_name: &str) -> Option<PathBuf> {
        let path = Path::new(icon_name);
        if path.is_absolute() {
            return path.exists().then(|| path.to_path_buf());
        }
        generic_fallbacks(icon_name).find_map(|name| self.find(name))
    }
}
