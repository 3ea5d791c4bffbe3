//! Client side of the prediction service: request encoding, response
//! classification and the domain types a result is made of.

pub mod api;
mod error;
mod multipart;
mod types;
mod wire;

pub use api::{HttpPredictor, IMAGE_FIELD};
pub use error::{CONNECT_FAILED_MESSAGE, NO_FOOD_DETECTED_MESSAGE, PredictionError};
pub use types::{
    ImageFile, IngredientRecord, NutritionTotals, PredictionResult, Quantity, media_type_for_path,
};

/// Turns an image into a nutrition estimate. One call is one attempt.
pub trait Predictor: Send + Sync {
    fn predict(&self, file: &ImageFile) -> Result<PredictionResult, PredictionError>;

    /// Download the image a result points at. `None` when it cannot be
    /// fetched; the caller then falls back to its local copy.
    fn fetch_image(&self, _image_url: &str) -> Option<Vec<u8>> {
        None
    }
}
