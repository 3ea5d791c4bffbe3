use std::path::{Path, PathBuf};

use crate::app_dirs;

use super::save::save_to_path;
use super::{AppSettings, CONFIG_FILE_NAME, ConfigError, ENDPOINT_ENV, map_app_dir_error};

/// Resolve the configuration file path, ensuring the parent directory exists.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let dir = app_dirs::app_root_dir().map_err(map_app_dir_error)?;
    Ok(dir.join(CONFIG_FILE_NAME))
}

/// Load settings, writing the defaults out on first launch.
///
/// `NUTRISCAN_PREDICT_URL` takes precedence over the file's endpoint but is
/// never written back.
pub fn load_or_default() -> Result<AppSettings, ConfigError> {
    let path = config_path()?;
    let mut settings = if path.exists() {
        load_settings_from(&path)?
    } else {
        let defaults = AppSettings::default();
        save_to_path(&defaults, &path)?;
        tracing::info!("Wrote default config to {}", path.display());
        defaults
    };
    if let Some(endpoint) = endpoint_override() {
        tracing::info!("Prediction endpoint overridden by {ENDPOINT_ENV}: {endpoint}");
        settings.prediction.endpoint = endpoint;
    }
    settings.prediction.validate()?;
    Ok(settings)
}

/// Like [`load_or_default`], but a broken config starts the app on defaults
/// instead of failing. The file on disk is left as it is.
pub fn load_or_fallback() -> AppSettings {
    match load_or_default() {
        Ok(settings) => settings,
        Err(err) => {
            tracing::warn!("Failed to load config, using defaults: {err}");
            AppSettings::default()
        }
    }
}

/// Parse a settings file; a missing file yields defaults.
pub fn load_settings_from(path: &Path) -> Result<AppSettings, ConfigError> {
    if !path.exists() {
        return Ok(AppSettings::default());
    }
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&text).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })
}

fn endpoint_override() -> Option<String> {
    std::env::var(ENDPOINT_ENV)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
