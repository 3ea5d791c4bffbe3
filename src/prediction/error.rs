/// Shown for every transport-level failure; the detail only goes to the log.
pub const CONNECT_FAILED_MESSAGE: &str =
    "Could not connect to the API. Make sure the prediction server is running.";
/// Shown when the service answers successfully but found nothing to report.
pub const NO_FOOD_DETECTED_MESSAGE: &str =
    "No recognizable food items detected in the image. Try another one.";

/// Why a prediction request produced no result.
///
/// `Display` is the text shown to the user.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum PredictionError {
    /// Network unreachable or the response could not be read or parsed.
    #[error("Could not connect to the API. Make sure the prediction server is running.")]
    Transport { detail: String },
    /// Non-success HTTP status.
    #[error("{message}")]
    Server { status: u16, message: String },
    /// Success status without any usable ingredient.
    #[error("{message}")]
    EmptyResult { message: String },
    /// The worker stopped without reporting an outcome.
    #[error("The analysis stopped unexpectedly. Please try again.")]
    Interrupted { detail: String },
}

impl PredictionError {
    pub(crate) fn transport(detail: impl Into<String>) -> Self {
        Self::Transport {
            detail: detail.into(),
        }
    }

    /// Diagnostic detail for the log, beyond what the user sees.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::Transport { detail } | Self::Interrupted { detail } => Some(detail),
            Self::Server { .. } | Self::EmptyResult { .. } => None,
        }
    }
}
