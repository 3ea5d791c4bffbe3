//! Top-level guard around each render pass.
//!
//! A panic while drawing trips the boundary: the panic is caught, logged once
//! and from then on only the fallback panel is drawn. Nothing short of a
//! session reload clears it.

use std::panic::{AssertUnwindSafe, catch_unwind};

/// What a guarded render pass produced.
#[derive(Debug, PartialEq, Eq)]
pub enum BoundaryOutcome<R> {
    Rendered(R),
    Fallback,
}

#[derive(Debug, Default)]
pub struct ErrorBoundary {
    tripped: Option<String>,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_tripped(&self) -> bool {
        self.tripped.is_some()
    }

    /// Panic message that tripped the boundary.
    pub fn failure(&self) -> Option<&str> {
        self.tripped.as_deref()
    }

    /// Run `render` unless the boundary has tripped.
    pub fn guard<R>(&mut self, render: impl FnOnce() -> R) -> BoundaryOutcome<R> {
        if self.tripped.is_some() {
            return BoundaryOutcome::Fallback;
        }
        match catch_unwind(AssertUnwindSafe(render)) {
            Ok(value) => BoundaryOutcome::Rendered(value),
            Err(payload) => {
                let message = if let Some(message) = payload.downcast_ref::<&str>() {
                    (*message).to_string()
                } else if let Some(message) = payload.downcast_ref::<String>() {
                    message.clone()
                } else {
                    "unknown panic".to_string()
                };
                tracing::error!("Render failed, showing fallback: {message}");
                self.tripped = Some(message);
                BoundaryOutcome::Fallback
            }
        }
    }
}
