//! Optional `ghofig.toml` application settings.

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::SettingsError;

/// Environment variable pointing at an explicit settings file.
pub const SETTINGS_PATH_ENV: &str = "GHOFIG_SETTINGS";

const DEFAULT_TICK_MS: u64 = 100;
const MIN_TICK_MS: u64 = 10;
const MAX_TICK_MS: u64 = 1000;

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
struct SettingsFile {
    config_path: Option<PathBuf>,
    tick_ms: Option<u64>,
    log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Overrides the Ghostty config file location.
    pub config_path: Option<PathBuf>,
    /// How long the UI waits for input before checking background results.
    pub tick: Duration,
    pub log_file: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: None,
            tick: Duration::from_millis(DEFAULT_TICK_MS),
            log_file: None,
        }
    }
}

impl Settings {
    /// Load settings from `GHOFIG_SETTINGS` or the default location.
    ///
    /// A missing file yields defaults; a malformed one is an error.
    pub fn load() -> Result<Self, SettingsError> {
        match settings_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, SettingsError> {
        let text = match std::fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default())
            }
            Err(source) => {
                return Err(SettingsError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        Self::parse(&text).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        let file: SettingsFile = toml::from_str(text)?;
        let tick_ms = file
            .tick_ms
            .unwrap_or(DEFAULT_TICK_MS)
            .clamp(MIN_TICK_MS, MAX_TICK_MS);
        Ok(Self {
            config_path: file.config_path,
            tick: Duration::from_millis(tick_ms),
            log_file: file.log_file,
        })
    }
}

fn settings_path() -> Option<PathBuf> {
    if let Some(path) = env::var_os(SETTINGS_PATH_ENV).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }
    dirs::config_dir().map(|dir| dir.join("ghofig").join("ghofig.toml"))
}
