//! Terminal browser for Ghostty configuration options.
//!
//! The crate pairs a read-only catalog of documented options ([`store`]) with
//! a line-oriented editor for the user's config file ([`config_file`]), and a
//! full-screen UI ([`ui`]) that ties the two together.

pub mod catalog;
pub mod config_file;
pub mod error;
pub mod paths;
pub mod settings;
pub mod store;
pub mod telemetry;
pub mod ui;

pub use config_file::ConfigFile;
pub use error::{ConfigFileError, SettingsError, StoreError};
pub use settings::Settings;
pub use store::{ConfigEntry, LookupStore};
pub use ui::run_ui;
