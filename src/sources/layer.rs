use log::debug;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::model::RawEntryDef;
use crate::ordered::OrderedMap;
use crate::sources::{Source, read_json};

/// One layer of definitions; a `None` value is the deletion sentinel.
pub type Layer = OrderedMap<Option<RawEntryDef>>;

pub const ENTRIES_DIR: &str = "entries";
pub const DEFAULT_LAYER: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayerKind {
    BundledDefault,
    BundledDesktop,
    UserDefault,
    UserDesktop,
}

#[derive(Debug, Clone)]
pub struct FileLayer {
    pub kind: LayerKind,
    pub path: PathBuf,
}

impl FileLayer {
    fn new(kind: LayerKind, root: &Path, name: &str) -> Self {
        Self {
            kind,
            path: root.join(ENTRIES_DIR).join(format!("{}.json", name)),
        }
    }
}

impl Source for FileLayer {
    fn load(&self) -> Result<Layer, ConfigError> {
        match read_json::<Layer>(&self.path)? {
            Some(layer) => {
                debug!("Loaded {:?} layer from {:?} ({} keys)", self.kind, self.path, layer.len());
                Ok(layer)
            }
            None if self.kind == LayerKind::BundledDefault => {
                Err(ConfigError::MissingBundled { path: self.path.clone() })
            }
            None => {
                debug!("No {:?} layer at {:?}, skipping", self.kind, self.path);
                Ok(Layer::new())
            }
        }
    }
}

/// The layers to apply, lowest precedence first.
pub fn layer_stack(
    data_dir: &Path,
    user_dir: Option<&Path>,
    desktop: Option<&str>,
) -> Vec<FileLayer> {
    let mut stack = vec![FileLayer::new(LayerKind::BundledDefault, data_dir, DEFAULT_LAYER)];
    if let Some(desktop) = desktop {
        stack.push(FileLayer::new(LayerKind::BundledDesktop, data_dir, desktop));
    }
    if let Some(user_dir) = user_dir {
        stack.push(FileLayer::new(LayerKind::UserDefault, user_dir, DEFAULT_LAYER));
        if let Some(desktop) = desktop {
            stack.push(FileLayer::new(LayerKind::UserDesktop, user_dir, desktop));
        }
    }
    stack
}

pub fn load_layers<S: Source>(sources: &[S]) -> Result<Vec<Layer>, ConfigError> {
    sources.iter().map(Source::load).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    fn write(root: &Path, name: &str, content: &str) {
        let dir = root.join(ENTRIES_DIR);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(format!("{}.json", name)), content).unwrap();
    }

    #[test]
    fn stack_order_is_bundled_then_user() {
        let stack = layer_stack(Path::new("/data"), Some(Path::new("/user")), Some("kde"));
        let kinds: Vec<_> = stack.iter().map(|l| l.kind).collect();
        assert_eq!(
            kinds,
            vec![
                LayerKind::BundledDefault,
                LayerKind::BundledDesktop,
                LayerKind::UserDefault,
                LayerKind::UserDesktop,
            ]
        );
        assert_eq!(stack[1].path, PathBuf::from("/data/entries/kde.json"));
        assert_eq!(stack[3].path, PathBuf::from("/user/entries/kde.json"));
    }

    #[test]
    fn no_desktop_skips_desktop_layers() {
        let stack = layer_stack(Path::new("/data"), Some(Path::new("/user")), None);
        let kinds: Vec<_> = stack.iter().map(|l| l.kind).collect();
        assert_eq!(kinds, vec![LayerKind::BundledDefault, LayerKind::UserDefault]);
    }

    #[test]
    fn missing_optional_layer_is_empty() {
        let dir = tempdir().unwrap();
        let layer = FileLayer::new(LayerKind::UserDefault, dir.path(), DEFAULT_LAYER);
        assert!(layer.load().unwrap().is_empty());
    }

    #[test]
    fn missing_bundled_default_is_fatal() {
        let dir = tempdir().unwrap();
        let layer = FileLayer::new(LayerKind::BundledDefault, dir.path(), DEFAULT_LAYER);
        assert!(matches!(layer.load(), Err(ConfigError::MissingBundled { .. })));
    }

    #[test]
    fn malformed_layer_is_a_parse_error() {
        let dir = tempdir().unwrap();
        write(dir.path(), "gnome", "{ \"lock\": ");
        let layer = FileLayer::new(LayerKind::UserDesktop, dir.path(), "gnome");
        assert!(matches!(layer.load(), Err(ConfigError::Parse { .. })));
    }

    #[test]
    fn null_entry_is_kept_as_sentinel() {
        let dir = tempdir().unwrap();
        write(dir.path(), DEFAULT_LAYER, r#"{"hibernate": null, "lock": {"command": "xflock4"}}"#);
        let layer = FileLayer::new(LayerKind::UserDefault, dir.path(), DEFAULT_LAYER)
            .load()
            .unwrap();
        assert_eq!(layer.keys().collect::<Vec<_>>(), vec!["hibernate", "lock"]);
        assert_eq!(layer.get("hibernate"), Some(&None));
    }

    #[test]
    fn in_memory_layers_load_as_given() {
        let base: Layer = serde_json::from_str(r#"{"lock": {"command": "A"}}"#).unwrap();
        let overlay: Layer = serde_json::from_str(r#"{"lock": null}"#).unwrap();
        let layers = load_layers(&[base.clone(), overlay.clone()]).unwrap();
        assert_eq!(layers, vec![base, overlay]);
    }
}
