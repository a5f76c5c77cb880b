use serde::Deserialize;
use std::collections::HashMap;
use log::{debug, info};

use crate::ordered::OrderedMap;

/// One recognized desktop environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DesktopDescriptor {
    pub key: String,
    pub env_var: String,
    pub aliases: Option<Vec<String>>,
}

/// Descriptor body as written in `desktops.json`; the key comes from the map.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct DesktopDef {
    pub env: String,
    #[serde(default)]
    pub aliases: Option<Vec<String>>,
}

/// `null` entries remove a descriptor when used as an overlay.
pub type DesktopTable = OrderedMap<Option<DesktopDef>>;

pub fn descriptors(table: DesktopTable) -> Vec<DesktopDescriptor> {
    table
        .into_iter()
        .filter_map(|(key, def)| {
            def.map(|def| DesktopDescriptor {
                key,
                env_var: def.env,
                aliases: def.aliases,
            })
        })
        .collect()
}

/// Lays `overlay` over `base`: known keys are replaced in place, new keys
/// appended, `null` removes.
pub fn overlay(mut base: DesktopTable, overlay: DesktopTable) -> DesktopTable {
    for (key, def) in overlay {
        match def {
            Some(def) => {
                base.insert(key, Some(def));
            }
            None => {
                base.remove(&key);
            }
        }
    }
    base
}

pub trait EnvironmentReader {
    fn var(&self, name: &str) -> Option<String>;
}

/// Reads the process environment.
pub struct ProcessEnv;

impl EnvironmentReader for ProcessEnv {
    fn var(&self, name: &str) -> Option<String> {
        std::env::var(name).ok()
    }
}

impl EnvironmentReader for HashMap<String, String> {
    fn var(&self, name: &str) -> Option<String> {
        self.get(name).cloned()
    }
}

impl DesktopDescriptor {
    /// The environment value must be contained in one of the aliases, not
    /// the other way round. Without aliases any non-empty value matches.
    fn matches(&self, value: &str) -> bool {
        match &self.aliases {
            Some(aliases) if !aliases.is_empty() => {
                aliases.iter().any(|alias| alias.contains(value))
            }
            _ => !value.is_empty(),
        }
    }
}

/// Returns the key of the first descriptor satisfied by `env`.
pub fn detect<'a, E>(descriptors: &'a [DesktopDescriptor], env: &E) -> Option<&'a str>
where
    E: EnvironmentReader + ?Sized,
{
    for descriptor in descriptors {
        let Some(value) = env.var(&descriptor.env_var) else {
            continue;
        };
        if descriptor.matches(&value) {
            info!(
                "Detected desktop '{}' from {}={}",
                descriptor.key, descriptor.env_var, value
            );
            return Some(descriptor.key.as_str());
        }
        debug!(
            "{}={} does not match desktop '{}'",
            descriptor.env_var, value, descriptor.key
        );
    }
    info!("No desktop detected, using default entries only");
    None
}
