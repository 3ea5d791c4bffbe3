//! egui front end: the landing page, the Analyze page and their view models.

pub mod ui;
pub mod view_model;
