use serde::de::DeserializeOwned;
use std::fs;
use std::io;
use std::path::Path;

use crate::error::ConfigError;

pub mod desktops;
pub mod layer;

pub use layer::Layer;

/// Something that yields one layer of entry definitions.
pub trait Source {
    fn load(&self) -> Result<Layer, ConfigError>;
}

impl Source for Layer {
    fn load(&self) -> Result<Layer, ConfigError> {
        Ok(self.clone())
    }
}

/// Reads a JSON definition file. A file that does not exist yields `None`.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, ConfigError> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(ConfigError::Io { path: path.to_path_buf(), source });
        }
    };
    serde_json::from_str(&content)
        .map(Some)
        .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
}
