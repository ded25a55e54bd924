//! Location of the Ghostty config file.

use std::env;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Environment variable that forces the target config file.
pub const CONFIG_PATH_ENV: &str = "GHOFIG_CONFIG";

const MACOS_BUNDLE_DIR: &str = "com.mitchellh.ghostty";

/// Resolve the config file to edit.
///
/// `GHOFIG_CONFIG` wins over the settings override. On macOS the Application
/// Support location is used when it already exists; otherwise the XDG
/// location is the default.
pub fn resolve_config_path(override_path: Option<&Path>) -> anyhow::Result<PathBuf> {
    if let Some(path) = explicit_path(env::var_os(CONFIG_PATH_ENV), override_path) {
        return Ok(path);
    }
    let home = dirs::home_dir().ok_or_else(|| anyhow::anyhow!("cannot determine home directory"))?;
    if cfg!(target_os = "macos") {
        let mac = macos_config_path(&home);
        if mac.exists() {
            return Ok(mac);
        }
    }
    Ok(xdg_config_path(&home, env::var_os("XDG_CONFIG_HOME").map(PathBuf::from)))
}

/// Whether a config file exists at any known location.
pub fn config_exists() -> bool {
    let Some(home) = dirs::home_dir() else {
        return false;
    };
    if cfg!(target_os = "macos") && macos_config_path(&home).exists() {
        return true;
    }
    xdg_config_path(&home, env::var_os("XDG_CONFIG_HOME").map(PathBuf::from)).exists()
}

fn explicit_path(from_env: Option<OsString>, from_settings: Option<&Path>) -> Option<PathBuf> {
    from_env
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
        .or_else(|| from_settings.map(Path::to_path_buf))
}

fn macos_config_path(home: &Path) -> PathBuf {
    home.join("Library")
        .join("Application Support")
        .join(MACOS_BUNDLE_DIR)
        .join("config")
}

fn xdg_config_path(home: &Path, xdg_config_home: Option<PathBuf>) -> PathBuf {
    let base = xdg_config_home
        .filter(|dir| !dir.as_os_str().is_empty())
        .unwrap_or_else(|| home.join(".config"));
    base.join("ghostty").join("config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn xdg_home_takes_precedence_over_dot_config() {
        let home = Path::new("/home/user");
        assert_eq!(
            xdg_config_path(home, Some(PathBuf::from("/xdg"))),
            PathBuf::from("/xdg/ghostty/config")
        );
        assert_eq!(
            xdg_config_path(home, None),
            PathBuf::from("/home/user/.config/ghostty/config")
        );
        assert_eq!(
            xdg_config_path(home, Some(PathBuf::new())),
            PathBuf::from("/home/user/.config/ghostty/config")
        );
    }

    #[test]
    fn environment_beats_settings_override() {
        let settings = Path::new("/tmp/from-settings/config");
        assert_eq!(
            explicit_path(Some(OsString::from("/tmp/from-env/config")), Some(settings)),
            Some(PathBuf::from("/tmp/from-env/config"))
        );
        assert_eq!(
            explicit_path(None, Some(settings)),
            Some(settings.to_path_buf())
        );
        assert_eq!(
            explicit_path(Some(OsString::new()), Some(settings)),
            Some(settings.to_path_buf()),
            "an empty variable is ignored"
        );
        assert_eq!(explicit_path(None, None), None);
    }

    #[test]
    fn macos_path_lives_under_application_support() {
        assert_eq!(
            macos_config_path(Path::new("/Users/me")),
            PathBuf::from("/Users/me/Library/Application Support/com.mitchellh.ghostty/config")
        );
    }
}
