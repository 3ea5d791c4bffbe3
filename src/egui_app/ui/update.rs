use std::time::Duration;

use eframe::egui;

use super::EguiApp;
use super::fallback;
use crate::error_boundary::BoundaryOutcome;

/// Repaint cadence while a request is in flight.
const LOADING_REPAINT: Duration = Duration::from_millis(100);

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        if self.session.poll_workflow() {
            ctx.request_repaint_after(LOADING_REPAINT);
        }
        if !self.boundary.is_tripped() {
            self.session.handle_file_drops(ctx);
        }
        let mut reload = false;
        egui::CentralPanel::default()
            .frame(egui::Frame::new().fill(ctx.style().visuals.panel_fill))
            .show(ctx, |ui| {
                let session = &mut self.session;
                match self.boundary.guard(|| session.render(ui)) {
                    BoundaryOutcome::Rendered(()) => {}
                    BoundaryOutcome::Fallback => {
                        reload = fallback::render(ui, self.boundary.failure());
                    }
                }
            });
        if reload {
            self.reload();
            ctx.request_repaint();
        }
    }
}
