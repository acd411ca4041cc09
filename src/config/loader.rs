use std::path::Path;
use tracing::{debug, warn};
use super::{default_config_path, AppConfig, ConfigError};
/// Load the configuration from `path`, or from `~/.collectify/config.toml`
/// when no path is given.
///
/// Returns `Ok(AppConfig::default())` if the file does not exist.
pub fn load_config(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    match path {
        Some(p) => load_config_from(p),
        None => match default_config_path() {
            Some(p) => load_config_from(&p),
            None => {
                warn!("Could not determine config directory; using defaults");
                Ok(AppConfig::default())
            }
        },
    }
}
/// Load the configuration from an explicit file path.
///
/// # Errors
///
/// Returns [`ConfigError`] if the file exists but cannot be read or parsed.
pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        debug!("Config not found at {}; using defaults", path.display());
        return Ok(AppConfig::default());
    }
    let content = std::fs::read_to_string(path)?;
    let config: AppConfig = toml::from_str(&content)?;
    debug!("Loaded config from {}", path.display());
    Ok(config)
}
