use std::path::PathBuf;
use thiserror::Error;

/// Failures while reading definition sources or the application config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("malformed definitions in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("malformed config {path}: {source}")]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
    #[error("bundled definitions missing: {path}")]
    MissingBundled { path: PathBuf },
}

/// Failures while turning merged definitions into resolved entries.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("entry '{entry}' is missing required field '{field}'")]
    MissingField { field: &'static str, entry: String },
    #[error("entry '{entry}' has no aliases")]
    EmptyAliases { entry: String },
    #[error("entries '{other}' and '{entry}' share the same alias list")]
    DuplicateAliases { entry: String, other: String },
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Build(#[from] BuildError),
}
