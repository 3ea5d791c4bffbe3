use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::ConfigError;

/// Endpoint of a locally run prediction service.
pub const DEFAULT_ENDPOINT: &str = "http://localhost:5000/predict";
/// Upper bound on a prediction response body.
pub const DEFAULT_MAX_RESPONSE_BYTES: usize = 1024 * 1024;

/// Root of `config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppSettings {
    /// How to reach the prediction service.
    #[serde(default)]
    pub prediction: PredictionSettings,
    /// Look and feel.
    #[serde(default)]
    pub appearance: AppearanceSettings,
}

/// Config keys: `endpoint`, `timeout_secs`, `max_response_bytes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionSettings {
    /// URL the image is POSTed to.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Whole-request timeout; unset waits indefinitely.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    /// Largest response body accepted before it is treated as malformed.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,
}

impl Default for PredictionSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            timeout_secs: None,
            max_response_bytes: DEFAULT_MAX_RESPONSE_BYTES,
        }
    }
}

impl PredictionSettings {
    /// Request timeout as a duration, if one is configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }

    /// Reject endpoints that are not absolute http(s) URLs.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::InvalidEndpoint {
            endpoint: self.endpoint.clone(),
            reason,
        };
        let url = url::Url::parse(self.endpoint.trim()).map_err(|err| invalid(err.to_string()))?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(invalid(format!("unsupported scheme {other:?}"))),
        }
    }
}

/// Persisted appearance preferences.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppearanceSettings {
    /// Light or dark visuals.
    #[serde(default)]
    pub theme: Theme,
}

/// Visual theme for the whole window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    /// Pale teal background, dark text.
    #[default]
    Light,
    /// Dark panels, light text.
    Dark,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_max_response_bytes() -> usize {
    DEFAULT_MAX_RESPONSE_BYTES
}
