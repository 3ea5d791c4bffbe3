//! Shared page furniture: content column, page header and footer.

use eframe::egui::{self, Align, Layout, RichText};

use super::style::{self, Palette};
use super::{APP_TITLE, Session};
use crate::router::Route;

/// Widest the content column grows on large windows.
pub(super) const CONTENT_WIDTH: f32 = 880.0;

impl Session {
    pub(super) fn palette(&self) -> Palette {
        style::palette(self.settings.appearance.theme)
    }

    /// Run `add_contents` in a centred column at most [`CONTENT_WIDTH`] wide.
    pub(super) fn centered_column(ui: &mut egui::Ui, add_contents: impl FnOnce(&mut egui::Ui)) {
        let width = ui.available_width().min(CONTENT_WIDTH);
        let side = ((ui.available_width() - width) / 2.0).max(0.0);
        ui.horizontal(|ui| {
            ui.add_space(side);
            ui.vertical(|ui| {
                ui.set_width(width);
                add_contents(ui);
            });
        });
    }

    /// Title bar of the Analyze page with its way back home.
    pub(super) fn render_page_header(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette();
        ui.add_space(16.0);
        ui.horizontal(|ui| {
            let back = ui
                .button(RichText::new("< Back").color(palette.accent_strong))
                .on_hover_text("Back to the home page");
            if back.clicked() {
                self.navigate_to(Route::Home);
            }
            ui.add_space(12.0);
            ui.heading(RichText::new(APP_TITLE).strong().color(palette.text_primary));
        });
        ui.add_space(4.0);
        ui.label(
            RichText::new("Upload a photo of your meal to get an instant nutrition estimate.")
                .color(palette.text_muted),
        );
        ui.add_space(16.0);
    }

    pub(super) fn render_footer(&self, ui: &mut egui::Ui) {
        let palette = self.palette();
        ui.add_space(32.0);
        ui.separator();
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.add_space(8.0);
            ui.label(
                RichText::new(footer_text(self.footer_year))
                    .small()
                    .color(palette.text_muted),
            );
            ui.add_space(12.0);
        });
    }
}

pub(super) fn footer_text(year: i32) -> String {
    format!("© {year} {APP_TITLE}. All rights reserved.")
}
