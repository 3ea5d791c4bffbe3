use eframe::egui::{self, Align, Button, Color32, Layout, RichText, Vec2};

use super::Session;
use super::style::{self, Palette};
use crate::egui_app::view_model::{IngredientRowView, ResultsViewModel, TotalsView};

/// Largest size of the echoed image.
const ECHO_MAX: Vec2 = Vec2::new(560.0, 384.0);

impl Session {
    pub(super) fn render_results(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette();
        let ctx = ui.ctx().clone();
        let Some(workflow) = self.workflow.as_ref() else {
            return;
        };
        let Some(result) = workflow.result() else {
            return;
        };
        let view = ResultsViewModel::from_result(result);
        // The service's copy first, the local preview when it could not be fetched.
        let echo = if view.image_url.is_some() {
            workflow
                .echo()
                .or_else(|| workflow.selection().map(|selection| selection.preview))
                .and_then(|id| self.textures.texture(&ctx, workflow.previews(), id))
        } else {
            None
        };

        let mut analyze_new = false;
        style::card_frame(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                if let Some(url) = &view.image_url {
                    ui.label(RichText::new("Your Uploaded Image").size(22.0).strong());
                    ui.add_space(12.0);
                    if let Some(texture) = &echo {
                        ui.add(egui::Image::new(texture).max_size(ECHO_MAX).corner_radius(12.0));
                    }
                    ui.add_space(6.0);
                    let link = ui.link("Open the analysed image").on_hover_text(url.as_str());
                    if link.clicked() {
                        if let Err(err) = open::that(url) {
                            tracing::warn!("Failed to open {url}: {err}");
                        }
                    }
                    ui.add_space(16.0);
                }
                let button = Button::new(
                    RichText::new("Analyze New Image")
                        .strong()
                        .color(Color32::WHITE),
                )
                .fill(palette.text_primary)
                .corner_radius(20.0)
                .min_size(Vec2::new(180.0, 38.0));
                analyze_new = ui.add(button).clicked();
            });
        });
        ui.add_space(20.0);

        style::card_frame(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.columns(2, |columns| {
                render_ingredients(&mut columns[0], palette, &view.rows);
                render_totals(&mut columns[1], palette, &view.totals);
            });
        });

        if analyze_new {
            if let Some(workflow) = self.workflow.as_mut() {
                workflow.reset();
            }
            self.router.navigate_to(crate::router::Route::Analyze);
        }
    }
}

fn render_ingredients(ui: &mut egui::Ui, palette: Palette, rows: &[IngredientRowView]) {
    ui.label(RichText::new("Detected Ingredients").size(20.0).strong());
    ui.separator();
    ui.add_space(8.0);
    for row in rows {
        egui::Frame::new()
            .fill(palette.bg_raised)
            .corner_radius(12.0)
            .inner_margin(egui::Margin::same(12))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&row.name).size(17.0).strong());
                        ui.label(RichText::new(&row.macros).color(palette.text_muted));
                    });
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.vertical(|ui| {
                            ui.label(
                                RichText::new(&row.calories)
                                    .size(20.0)
                                    .strong()
                                    .color(palette.accent_strong),
                            );
                            ui.label(RichText::new("kcal").small().color(palette.text_muted));
                        });
                    });
                });
            });
        ui.add_space(8.0);
    }
}

fn render_totals(ui: &mut egui::Ui, palette: Palette, totals: &TotalsView) {
    ui.label(RichText::new("Total Nutrition").size(20.0).strong());
    ui.separator();
    ui.add_space(8.0);
    egui::Frame::new()
        .fill(palette.accent)
        .corner_radius(16.0)
        .inner_margin(egui::Margin::same(16))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.label(
                    RichText::new(&totals.calories)
                        .size(36.0)
                        .strong()
                        .color(Color32::WHITE),
                );
                ui.label(RichText::new("Total Calories (kcal)").color(Color32::WHITE));
            });
        });
    ui.add_space(12.0);
    for (label, value) in [
        ("Protein:", &totals.protein),
        ("Carbs:", &totals.carbs),
        ("Fat:", &totals.fat),
    ] {
        egui::Frame::new()
            .fill(palette.bg_raised)
            .corner_radius(10.0)
            .inner_margin(egui::Margin::same(10))
            .show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(RichText::new(label).strong());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        ui.label(RichText::new(value).size(17.0).strong().color(palette.success));
                    });
                });
            });
        ui.add_space(6.0);
    }
}
