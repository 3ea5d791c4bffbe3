//! The upload-and-predict workflow behind the Analyze page.
//!
//! One [`UploadWorkflow`] lives for one visit to the page. It owns the current
//! selection and its preview, runs at most one prediction at a time and turns
//! the outcome into a [`WorkflowState`] the UI renders. A successful outcome
//! may also register the image the service echoed back as a second preview.

mod jobs;
mod preview;
mod state;


use std::sync::Arc;

use crate::prediction::{ImageFile, Predictor};

use jobs::{CompletedPrediction, PredictionJob};

pub use preview::{MAX_PREVIEW_EDGE, PreviewId, PreviewImage, PreviewStore};
pub use state::{UploadSelection, ValidationError, WorkflowState};

pub struct UploadWorkflow {
    predictor: Arc<dyn Predictor>,
    selection: Option<UploadSelection>,
    state: WorkflowState,
    previews: PreviewStore,
    echo: Option<PreviewId>,
    job: Option<PredictionJob>,
}

impl UploadWorkflow {
    pub fn new(predictor: Arc<dyn Predictor>) -> Self {
        Self {
            predictor,
            selection: None,
            state: WorkflowState::Idle,
            previews: PreviewStore::default(),
            echo: None,
            job: None,
        }
    }

    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    pub fn selection(&self) -> Option<&UploadSelection> {
        self.selection.as_ref()
    }

    pub fn previews(&self) -> &PreviewStore {
        &self.previews
    }

    /// Preview of the image the service echoed back. Only set while the state
    /// is `Success` and the image could be fetched and decoded.
    pub fn echo(&self) -> Option<PreviewId> {
        self.echo
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading()
    }

    /// True when the submit control should be enabled.
    pub fn can_submit(&self) -> bool {
        self.selection.is_some() && !self.is_loading()
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error()
    }

    pub fn result(&self) -> Option<&crate::prediction::PredictionResult> {
        self.state.result()
    }

    /// Replace the selection with `file` and clear any previous outcome.
    ///
    /// Files from the picker are accepted as-is; the picker's own filter is
    /// the only type check on that path.
    pub fn select_file(&mut self, file: ImageFile) {
        self.detach_job();
        if let Some(previous) = self.selection.take() {
            self.previews.revoke(previous.preview);
        }
        let preview = self.previews.create(&file);
        tracing::info!(file = %file.name, media_type = %file.media_type, "Image selected");
        self.selection = Some(UploadSelection { file, preview });
        self.set_state(WorkflowState::Idle);
    }

    /// Accept a dropped file if it declares an image media type.
    ///
    /// A rejected drop keeps the current selection and shows the error. It
    /// never interrupts a running request.
    pub fn drop_file(&mut self, file: ImageFile) -> Result<(), ValidationError> {
        if !file.is_image() {
            tracing::info!(file = %file.name, media_type = %file.media_type, "Rejected non-image drop");
            if !self.is_loading() {
                self.set_state(WorkflowState::Failed(ValidationError::NotAnImage.to_string()));
            }
            return Err(ValidationError::NotAnImage);
        }
        self.select_file(file);
        Ok(())
    }

    /// Surface a file that was chosen but could not be read from disk. The
    /// current selection is kept.
    pub fn reject_unreadable(&mut self, name: &str, err: &std::io::Error) {
        tracing::warn!("Failed to read {name}: {err}");
        if !self.is_loading() {
            self.set_state(WorkflowState::Failed(format!("Could not read {name}.")));
        }
    }

    /// Start a prediction for the current selection.
    pub fn submit(&mut self) -> Result<(), ValidationError> {
        if self.is_loading() {
            return Err(ValidationError::RequestInFlight);
        }
        let Some(selection) = self.selection.as_ref() else {
            self.set_state(WorkflowState::Failed(ValidationError::NoFileSelected.to_string()));
            return Err(ValidationError::NoFileSelected);
        };
        self.job = Some(PredictionJob::spawn(
            Arc::clone(&self.predictor),
            selection.file.clone(),
        ));
        self.set_state(WorkflowState::Loading);
        Ok(())
    }

    /// Fold a finished request into the state. Returns true when the state
    /// changed.
    pub fn poll(&mut self) -> bool {
        let Some(outcome) = self.job.as_ref().and_then(PredictionJob::try_recv) else {
            return false;
        };
        let elapsed = self.job.take().map(|job| job.elapsed()).unwrap_or_default();
        match outcome {
            Ok(CompletedPrediction { result, echo }) => {
                tracing::info!(
                    ingredients = result.ingredients.len(),
                    echoed = echo.is_some(),
                    elapsed_ms = elapsed.as_millis() as u64,
                    "Prediction finished"
                );
                self.set_state(WorkflowState::Success(result));
                self.echo = echo.map(|image| self.previews.insert(image));
            }
            Err(err) => {
                match err.detail() {
                    Some(detail) => tracing::warn!("Prediction failed: {err} ({detail})"),
                    None => tracing::warn!("Prediction failed: {err}"),
                }
                self.set_state(WorkflowState::Failed(err.to_string()));
            }
        }
        if tracing::enabled!(tracing::Level::DEBUG) {
            match serde_json::to_string(&self.state) {
                Ok(json) => tracing::debug!("Workflow state: {json}"),
                Err(err) => tracing::debug!("Workflow state not serializable: {err}"),
            }
        }
        true
    }

    /// Forget the selection and any outcome, ready for another image.
    pub fn reset(&mut self) {
        self.detach_job();
        if let Some(previous) = self.selection.take() {
            self.previews.revoke(previous.preview);
        }
        self.set_state(WorkflowState::Idle);
    }

    fn detach_job(&mut self) {
        if self.job.take().is_some() {
            tracing::info!("Discarding in-flight prediction");
            self.set_state(WorkflowState::Idle);
        }
    }

    /// Replace the state, revoking the echo of any previous result.
    fn set_state(&mut self, state: WorkflowState) {
        if let Some(echo) = self.echo.take() {
            self.previews.revoke(echo);
        }
        self.state = state;
    }
}

impl Drop for UploadWorkflow {
    fn drop(&mut self) {
        self.previews.revoke_all();
    }
}
