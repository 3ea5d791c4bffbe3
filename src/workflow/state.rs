use serde::Serialize;

use crate::prediction::{ImageFile, PredictionResult};

use super::preview::PreviewId;

/// Where one upload-and-predict request stands.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
#[serde(tag = "state", content = "value", rename_all = "snake_case")]
pub enum WorkflowState {
    /// Nothing submitted, or a fresh selection was made.
    #[default]
    Idle,
    /// A request is in flight.
    Loading,
    /// The last request produced a result.
    Success(PredictionResult),
    /// The last action produced an error message.
    Failed(String),
}

impl WorkflowState {
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    pub fn result(&self) -> Option<&PredictionResult> {
        match self {
            Self::Success(result) => Some(result),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// The file currently chosen for analysis and its preview handle.
#[derive(Clone, Debug, PartialEq)]
pub struct UploadSelection {
    pub file: ImageFile,
    pub preview: PreviewId,
}

/// Input problems caught before any network call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select an image file first.")]
    NoFileSelected,
    #[error("Only image files are allowed.")]
    NotAnImage,
    #[error("A prediction is already running.")]
    RequestInFlight,
}
