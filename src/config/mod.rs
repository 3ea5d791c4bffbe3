//! Persisted application settings (`config.toml` in the app directory).

use crate::app_dirs;

mod errors;
mod load;
mod save;
mod types;


/// Default filename used to store the app configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";
/// Environment variable overriding `prediction.endpoint`.
pub const ENDPOINT_ENV: &str = "NUTRISCAN_PREDICT_URL";

pub use errors::ConfigError;
pub use load::{config_path, load_or_default, load_or_fallback, load_settings_from};
pub use save::save_to_path;
pub use types::{
    AppSettings, AppearanceSettings, DEFAULT_ENDPOINT, DEFAULT_MAX_RESPONSE_BYTES,
    PredictionSettings, Theme,
};

fn map_app_dir_error(error: app_dirs::AppDirError) -> ConfigError {
    match error {
        app_dirs::AppDirError::NoBaseDir => ConfigError::NoConfigDir,
        app_dirs::AppDirError::CreateDir { path, source } => ConfigError::CreateDir { path, source },
    }
}
