use std::path::Path;

use ghofig::paths::{resolve_config_path, CONFIG_PATH_ENV};

// Single test in its own binary: it mutates the process environment.
#[test]
fn config_env_var_overrides_settings_path() {
    std::env::set_var(CONFIG_PATH_ENV, "/tmp/from-env/config");
    let resolved = resolve_config_path(Some(Path::new("/tmp/from-settings/config")))
        .expect("resolve config path");
    assert_eq!(resolved, Path::new("/tmp/from-env/config"));

    std::env::remove_var(CONFIG_PATH_ENV);
    let resolved = resolve_config_path(Some(Path::new("/tmp/from-settings/config")))
        .expect("resolve config path");
    assert_eq!(resolved, Path::new("/tmp/from-settings/config"));
}
