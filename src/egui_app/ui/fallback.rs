use eframe::egui::{self, Align, Layout, RichText, Vec2};

/// Static recovery screen shown once the error boundary has tripped.
/// Returns true when the user asked for a reload.
pub(super) fn render(ui: &mut egui::Ui, failure: Option<&str>) -> bool {
    let mut reload = false;
    ui.with_layout(Layout::top_down(Align::Center), |ui| {
        ui.add_space(ui.available_height() * 0.25);
        ui.heading(RichText::new("Something went wrong.").strong());
        ui.add_space(8.0);
        ui.label("The page could not be displayed. Reload to start over.");
        if let Some(failure) = failure {
            ui.add_space(4.0);
            ui.label(RichText::new(failure).small().weak());
        }
        ui.add_space(16.0);
        reload = ui
            .add(egui::Button::new("Reload").min_size(Vec2::new(120.0, 36.0)))
            .clicked();
    });
    reload
}
