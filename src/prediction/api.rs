//! HTTP client for the prediction service.

use crate::config::PredictionSettings;
use crate::http_client;

use super::error::PredictionError;
use super::multipart;
use super::types::{ImageFile, PredictionResult};
use super::wire;
use super::Predictor;

/// Multipart field the service reads the image from.
pub const IMAGE_FIELD: &str = "image";
/// Upper bound on an echoed image download.
const MAX_ECHO_BYTES: usize = 16 * 1024 * 1024;

/// Sends images to the configured endpoint with `ureq`.
pub struct HttpPredictor {
    endpoint: String,
    agent: ureq::Agent,
    max_response_bytes: usize,
}

impl HttpPredictor {
    pub fn new(settings: &PredictionSettings) -> Self {
        Self {
            endpoint: settings.endpoint.trim().to_string(),
            agent: http_client::build_agent(settings.timeout()),
            max_response_bytes: settings.max_response_bytes,
        }
    }

    fn read_body(&self, response: ureq::Response) -> Result<Vec<u8>, PredictionError> {
        http_client::read_response_bytes(response, self.max_response_bytes)
            .map_err(|err| PredictionError::transport(format!("failed to read response: {err}")))
    }
}

impl Predictor for HttpPredictor {
    fn predict(&self, file: &ImageFile) -> Result<PredictionResult, PredictionError> {
        let form = multipart::file_form(IMAGE_FIELD, file);
        tracing::info!(
            endpoint = %self.endpoint,
            file = %file.name,
            bytes = file.bytes.len(),
            "Submitting image for prediction"
        );
        let request = self
            .agent
            .post(&self.endpoint)
            .set("Accept", "application/json")
            .set("Content-Type", &form.content_type);

        match request.send_bytes(&form.body) {
            Ok(response) => {
                let body = self.read_body(response)?;
                wire::classify_success(&body)
            }
            Err(ureq::Error::Status(code, response)) => {
                let status_text = response.status_text().to_string();
                let body = self.read_body(response).unwrap_or_default();
                Err(wire::classify_failure(code, &status_text, &body))
            }
            Err(ureq::Error::Transport(err)) => Err(PredictionError::transport(err.to_string())),
        }
    }

    fn fetch_image(&self, image_url: &str) -> Option<Vec<u8>> {
        let Some(url) = resolve_image_url(&self.endpoint, image_url) else {
            tracing::warn!("Ignoring unusable image URL {image_url:?}");
            return None;
        };
        let response = match self.agent.get(url.as_str()).call() {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!("Failed to fetch analysed image {url}: {err}");
                return None;
            }
        };
        match http_client::read_response_bytes(response, MAX_ECHO_BYTES) {
            Ok(bytes) => Some(bytes),
            Err(err) => {
                tracing::warn!("Failed to read analysed image {url}: {err}");
                None
            }
        }
    }
}

/// Absolute http(s) URL for `image_url`, resolving relative paths against
/// the prediction endpoint.
fn resolve_image_url(endpoint: &str, image_url: &str) -> Option<url::Url> {
    let image_url = image_url.trim();
    if image_url.is_empty() {
        return None;
    }
    let url = match url::Url::parse(image_url) {
        Ok(url) => url,
        Err(url::ParseError::RelativeUrlWithoutBase) => {
            url::Url::parse(endpoint).ok()?.join(image_url).ok()?
        }
        Err(_) => return None,
    };
    matches!(url.scheme(), "http" | "https").then_some(url)
}
