//! Error types shared across the crate.

use std::path::PathBuf;

use thiserror::Error;

/// Lookup store failures.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The embedded catalog could not be materialized or opened.
    #[error("failed to initialize option catalog: {0}")]
    Init(String),
    #[error("catalog query failed: {0}")]
    Query(#[from] rusqlite::Error),
    #[error("option not found: {0}")]
    NotFound(i64),
}

/// Failures while reading or rewriting the Ghostty config file.
#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("{}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigFileError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Failures while loading application settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid settings {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
