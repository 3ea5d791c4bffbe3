#![deny(missing_docs)]

//! Entry point for the egui-based nutrition predictor.
#![cfg_attr(
    all(not(debug_assertions), target_os = "windows"),
    windows_subsystem = "windows"
)]
use eframe::egui;
use nutriscan::config;
use nutriscan::egui_app::ui::{APP_TITLE, EguiApp, MIN_VIEWPORT_SIZE};
use nutriscan::logging;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let viewport = egui::ViewportBuilder::default()
        .with_title(APP_TITLE)
        .with_inner_size([1024.0, 820.0])
        .with_min_inner_size(MIN_VIEWPORT_SIZE)
        .with_drag_and_drop(true);
    let native_options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };

    let settings = config::load_or_fallback();
    eframe::run_native(
        APP_TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(EguiApp::new(settings)))),
    )?;
    Ok(())
}
