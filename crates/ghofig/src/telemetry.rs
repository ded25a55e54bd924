//! Tracing setup. The UI owns the terminal, so events go to a file.

use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

/// Filter directives, e.g. `GHOFIG_LOG=ghofig=debug`.
pub const LOG_ENV: &str = "GHOFIG_LOG";

/// Default log location when settings do not name one.
pub fn default_log_path() -> PathBuf {
    std::env::temp_dir().join("ghofig.log")
}

/// Install a file-backed subscriber when `GHOFIG_LOG` is set.
///
/// Returns the log path in use, or `None` when logging stays disabled.
pub fn init(log_file: Option<&Path>) -> anyhow::Result<Option<PathBuf>> {
    let Ok(directives) = std::env::var(LOG_ENV) else {
        return Ok(None);
    };
    let path = log_file.map(Path::to_path_buf).unwrap_or_else(default_log_path);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("open log file {}", path.display()))?;
    let filter = EnvFilter::try_new(directives.trim())
        .with_context(|| format!("invalid {LOG_ENV} filter"))?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|err| anyhow::anyhow!("install tracing subscriber: {err}"))?;
    Ok(Some(path))
}
