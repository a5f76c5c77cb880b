use log::{debug, info, warn};
use std::path::PathBuf;

use crate::builder;
use crate::desktop::{self, EnvironmentReader};
use crate::error::StartupError;
use crate::icons::IconResolver;
use crate::index::EntryIndex;
use crate::merge;
use crate::model::ResultItem;
use crate::sources::desktops::load_descriptors;
use crate::sources::layer::{layer_stack, load_layers};

/// How the active desktop is chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DesktopChoice {
    Detect,
    Forced(Option<String>),
}

impl DesktopChoice {
    /// `None` detects, `""` and `"none"` force no desktop.
    pub fn from_setting(setting: Option<&str>) -> Self {
        match setting {
            None => DesktopChoice::Detect,
            Some("") | Some("none") => DesktopChoice::Forced(None),
            Some(key) => DesktopChoice::Forced(Some(key.to_string())),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Locations {
    pub data_dir: PathBuf,
    pub user_dir: Option<PathBuf>,
}

/// The resolved menu, built once at startup.
pub struct PowerMenu {
    desktop: Option<String>,
    index: EntryIndex,
}

impl PowerMenu {
    pub fn load<E>(
        locations: &Locations,
        choice: DesktopChoice,
        env: &E,
        icons: &dyn IconResolver,
    ) -> Result<Self, StartupError>
    where
        E: EnvironmentReader + ?Sized,
    {
        let user_dir = locations.user_dir.as_deref();
        let descriptors = load_descriptors(&locations.data_dir, user_dir)?;
        let desktop = match choice {
            DesktopChoice::Detect => desktop::detect(&descriptors, env).map(str::to_string),
            DesktopChoice::Forced(key) => {
                if let Some(key) = &key {
                    if !descriptors.iter().any(|d| &d.key == key) {
                        warn!("Forced desktop '{}' is not a known desktop", key);
                    }
                }
                info!("Desktop forced to {:?}", key);
                key
            }
        };

        let stack = layer_stack(&locations.data_dir, user_dir, desktop.as_deref());
        let layers = load_layers(stack.as_slice())?;
        let merged = merge::merge_all(&layers);
        debug!("Merged entries: {:?}", merged.keys().collect::<Vec<_>>());
        let index = builder::build(&merged, icons)?;

        Ok(Self { desktop, index })
    }

    pub fn desktop(&self) -> Option<&str> {
        self.desktop.as_deref()
    }

    pub fn index(&self) -> &EntryIndex {
        &self.index
    }

    pub fn query(&self, arg: Option<&str>) -> Vec<ResultItem> {
        self.index.query(arg).into_iter().map(ResultItem::from).collect()
    }
}
