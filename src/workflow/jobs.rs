//! Background prediction requests.
//!
//! Each submission runs on its own thread and reports exactly one outcome
//! over a channel that the UI polls once per frame. A successful outcome also
//! carries the image the service echoed back, when it could be fetched.

use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use crate::prediction::{ImageFile, PredictionError, PredictionResult, Predictor};

use super::preview::PreviewImage;

/// A finished prediction and the decoded image at its `image_url`.
#[derive(Debug)]
pub(crate) struct CompletedPrediction {
    pub(crate) result: PredictionResult,
    pub(crate) echo: Option<PreviewImage>,
}

pub(crate) type PredictionOutcome = Result<CompletedPrediction, PredictionError>;

/// Handle to one in-flight request. Dropping it detaches the worker, whose
/// late answer is then discarded.
#[derive(Debug)]
pub(crate) struct PredictionJob {
    rx: Receiver<PredictionOutcome>,
    started: Instant,
}

impl PredictionJob {
    pub(crate) fn spawn(predictor: Arc<dyn Predictor>, file: ImageFile) -> Self {
        let (tx, rx) = mpsc::channel();
        let started = Instant::now();
        let guard = CompletionGuard { tx: Some(tx) };
        let spawned = thread::Builder::new()
            .name("prediction".into())
            .spawn(move || run(predictor.as_ref(), &file, guard));
        if let Err(err) = spawned {
            // The guard moved into the closure was dropped with it, so the
            // receiver already holds an Interrupted outcome.
            tracing::error!("Failed to start prediction worker: {err}");
        }
        Self { rx, started }
    }

    /// The outcome if the worker has finished, `None` while it is running.
    pub(crate) fn try_recv(&self) -> Option<PredictionOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(PredictionError::Interrupted {
                detail: "prediction worker exited without a result".into(),
            })),
        }
    }

    pub(crate) fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

fn run(predictor: &dyn Predictor, file: &ImageFile, guard: CompletionGuard) {
    let outcome = catch_unwind(AssertUnwindSafe(|| -> PredictionOutcome {
        let result = predictor.predict(file)?;
        let echo = fetch_echo(predictor, &result);
        Ok(CompletedPrediction { result, echo })
    }))
    .unwrap_or_else(|payload| {
        Err(PredictionError::Interrupted {
            detail: format!("prediction worker panicked: {}", panic_message(payload.as_ref())),
        })
    });
    guard.complete(outcome);
}

fn fetch_echo(predictor: &dyn Predictor, result: &PredictionResult) -> Option<PreviewImage> {
    let image_url = result.image_url.trim();
    if image_url.is_empty() {
        return None;
    }
    let bytes = predictor.fetch_image(image_url)?;
    let image = PreviewImage::decode(&bytes);
    if image.is_none() {
        tracing::warn!("Analysed image at {image_url} could not be decoded");
    }
    image
}

/// Makes sure the receiver hears exactly one outcome, even if the worker
/// unwinds past `complete`.
struct CompletionGuard {
    tx: Option<Sender<PredictionOutcome>>,
}

impl CompletionGuard {
    fn complete(mut self, outcome: PredictionOutcome) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(outcome);
        }
    }
}

impl Drop for CompletionGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            let _ = tx.send(Err(PredictionError::Interrupted {
                detail: "prediction worker stopped before reporting".into(),
            }));
        }
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dropped_guard_reports_interrupted() {
        let (tx, rx) = mpsc::channel();
        drop(CompletionGuard { tx: Some(tx) });
        assert!(matches!(
            rx.try_recv().unwrap(),
            Err(PredictionError::Interrupted { .. })
        ));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn completed_guard_reports_once() {
        let (tx, rx) = mpsc::channel();
        let guard = CompletionGuard { tx: Some(tx) };
        guard.complete(Err(PredictionError::transport("refused")));
        assert!(matches!(
            rx.try_recv().unwrap(),
            Err(PredictionError::Transport { .. })
        ));
        assert!(matches!(rx.try_recv(), Err(TryRecvError::Disconnected)));
    }

    struct EchoingPredictor(Option<Vec<u8>>);

    impl Predictor for EchoingPredictor {
        fn predict(&self, _file: &ImageFile) -> Result<PredictionResult, PredictionError> {
            Err(PredictionError::transport("unused"))
        }

        fn fetch_image(&self, _image_url: &str) -> Option<Vec<u8>> {
            self.0.clone()
        }
    }

    fn result_at(image_url: &str) -> PredictionResult {
        PredictionResult {
            image_url: image_url.into(),
            ingredients: Vec::new(),
            totals: Default::default(),
        }
    }

    fn png(width: u32, height: u32) -> Vec<u8> {
        let image = image::RgbaImage::from_pixel(width, height, image::Rgba([1, 2, 3, 255]));
        let mut bytes = std::io::Cursor::new(Vec::new());
        image.write_to(&mut bytes, image::ImageFormat::Png).unwrap();
        bytes.into_inner()
    }

    #[test]
    fn echo_is_decoded_from_the_fetched_image() {
        let predictor = EchoingPredictor(Some(png(5, 3)));
        let echo = fetch_echo(&predictor, &result_at("http://svc/static/a.png")).unwrap();
        assert_eq!((echo.width, echo.height), (5, 3));
    }

    #[test]
    fn echo_is_skipped_for_blank_or_undecodable_images() {
        let predictor = EchoingPredictor(Some(png(2, 2)));
        assert!(fetch_echo(&predictor, &result_at("  ")).is_none());
        let predictor = EchoingPredictor(Some(b"not an image".to_vec()));
        assert!(fetch_echo(&predictor, &result_at("http://svc/a.png")).is_none());
        let predictor = EchoingPredictor(None);
        assert!(fetch_echo(&predictor, &result_at("http://svc/a.png")).is_none());
    }

    #[test]
    fn panic_payloads_are_readable() {
        let payload = catch_unwind(|| panic!("boom {}", 1)).unwrap_err();
        assert_eq!(panic_message(payload.as_ref()), "boom 1");
    }
}
