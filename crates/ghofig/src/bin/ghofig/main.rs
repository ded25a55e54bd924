mod cli;

use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use ghofig::config_file::ConfigFile;
use ghofig::paths;
use ghofig::settings::Settings;
use ghofig::store::{LookupStore, EMBEDDED_CATALOG};
use ghofig::telemetry;

use crate::cli::Cli;

fn main() -> ExitCode {
    let _cli = Cli::parse();
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::from(1)
        }
    }
}

fn run() -> anyhow::Result<()> {
    let settings = Settings::load()?;
    if let Some(path) = telemetry::init(settings.log_file.as_deref())? {
        info!(log = %path.display(), version = env!("CARGO_PKG_VERSION"), "ghofig starting");
    }

    let store = LookupStore::from_embedded(EMBEDDED_CATALOG).context("load option catalog")?;
    info!(entries = store.count()?, "option catalog ready");
    let config_path = paths::resolve_config_path(settings.config_path.as_deref())?;
    info!(config = %config_path.display(), "resolved config file");
    if !paths::config_exists() {
        info!("no Ghostty config at the default locations yet; saving creates one");
    }

    ghofig::run_ui(store, ConfigFile::new(config_path), &settings)
}
