//! Error types for the layered configuration service.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid default directory name: {0:?}")]
    InvalidDirectoryName(String),

    #[error("Failed to create config directory {path}: {source}")]
    CreateDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to extract default configuration to {path}: {source}")]
    Bootstrap {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read configuration file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration from {origin}: {source}")]
    Parse {
        origin: String,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to persist configuration to {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: PersistError,
    },

    #[error("Value at key '{key}' cannot be read as {expected}")]
    ValueType { key: String, expected: &'static str },
}

/// Underlying cause of a persistence failure.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Serialize(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
