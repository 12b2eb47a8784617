//! Command implementations.

pub mod config;
pub mod parse;
pub mod run;

use std::path::Path;

use invozip_core::AppConfig;

/// Load configuration: explicit path, then the user config file, then
/// built-in defaults.
pub(crate) fn load_config(config_path: Option<&str>) -> anyhow::Result<AppConfig> {
    if let Some(path) = config_path {
        return Ok(AppConfig::from_file(Path::new(path))?);
    }
    let default_path = config::default_config_path();
    if default_path.exists() {
        Ok(AppConfig::from_file(&default_path)?)
    } else {
        Ok(AppConfig::default())
    }
}
