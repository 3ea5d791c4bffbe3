//! Desktop client that sends a food photo to a prediction service and shows
//! the nutrition estimate it returns.
/// Application data directory helpers.
pub mod app_dirs;
/// TOML-backed application settings.
pub mod config;
/// egui front end.
pub mod egui_app;
/// Top-level render guard.
pub mod error_boundary;
pub(crate) mod http_client;
/// Logging setup.
pub mod logging;
/// Prediction service client and result types.
pub mod prediction;
/// Page navigation.
pub mod router;
/// Upload-and-predict workflow state.
pub mod workflow;
