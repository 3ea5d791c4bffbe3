use eframe::egui::{self, Align, Button, Color32, Layout, RichText, Vec2};

use super::style::{self, Palette};
use super::{APP_TITLE, Session};
use crate::router::Route;

struct Card {
    title: &'static str,
    description: &'static str,
}

const FEATURES: [Card; 3] = [
    Card {
        title: "Easy Upload",
        description: "Simply drag and drop or click to upload your food photos from any device.",
    },
    Card {
        title: "AI Analysis",
        description: "Advanced machine learning identifies ingredients and estimates portion sizes accurately.",
    },
    Card {
        title: "Detailed Results",
        description: "Get calorie breakdown for each ingredient in your meal for precise tracking.",
    },
];

const STEPS: [Card; 3] = [
    Card {
        title: "Upload Image",
        description: "Take or upload a photo of your meal.",
    },
    Card {
        title: "AI Processing",
        description: "Our AI analyzes and identifies all ingredients.",
    },
    Card {
        title: "Get Results",
        description: "View detailed calorie breakdown and total count.",
    },
];

impl Session {
    pub(super) fn render_home_page(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette();
        Self::centered_column(ui, |ui| {
            ui.add_space(24.0);
            render_hero(ui, palette);
            ui.add_space(20.0);
            if render_call_to_action(ui, palette) {
                self.navigate_to(Route::Analyze);
            }
            ui.add_space(20.0);
            render_card_row(ui, palette, &FEATURES, false);
            ui.add_space(28.0);
            style::card_frame(palette).show(ui, |ui| {
                ui.with_layout(Layout::top_down(Align::Center), |ui| {
                    ui.heading(RichText::new("How It Works").strong());
                });
                ui.add_space(12.0);
                render_card_row(ui, palette, &STEPS, true);
            });
        });
    }
}

fn render_hero(ui: &mut egui::Ui, palette: Palette) {
    egui::Frame::new()
        .fill(palette.accent_soft)
        .corner_radius(24.0)
        .inner_margin(egui::Margin::same(32))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.label(
                    RichText::new(APP_TITLE)
                        .size(36.0)
                        .strong()
                        .color(palette.text_primary),
                );
                ui.add_space(6.0);
                ui.label(
                    RichText::new("Discover the nutritional content of your meals instantly")
                        .size(18.0)
                        .color(palette.text_muted),
                );
            });
        });
}

/// Returns true when "Get Started" was clicked.
fn render_call_to_action(ui: &mut egui::Ui, palette: Palette) -> bool {
    let mut clicked = false;
    style::card_frame(palette).show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.with_layout(Layout::top_down(Align::Center), |ui| {
            ui.label(RichText::new("Smart Food Analysis").size(24.0).strong());
            ui.add_space(8.0);
            ui.label(
                RichText::new(
                    "Upload any food image and our advanced AI will identify ingredients and \
                     calculate precise calorie counts for each component. Perfect for tracking \
                     your nutrition goals!",
                )
                .color(palette.text_muted),
            );
            ui.add_space(16.0);
            let button = Button::new(
                RichText::new("Get Started  >")
                    .size(16.0)
                    .strong()
                    .color(Color32::WHITE),
            )
            .fill(palette.accent)
            .corner_radius(20.0)
            .min_size(Vec2::new(160.0, 40.0));
            clicked = ui.add(button).clicked();
        });
    });
    clicked
}

fn render_card_row(ui: &mut egui::Ui, palette: Palette, cards: &[Card], numbered: bool) {
    ui.columns(cards.len(), |columns| {
        for (index, (column, card)) in columns.iter_mut().zip(cards).enumerate() {
            style::card_frame(palette).show(column, |ui| {
                ui.set_width(ui.available_width());
                ui.with_layout(Layout::top_down(Align::Center), |ui| {
                    if numbered {
                        ui.label(
                            RichText::new((index + 1).to_string())
                                .size(26.0)
                                .strong()
                                .color(palette.accent),
                        );
                    }
                    ui.label(RichText::new(card.title).size(17.0).strong());
                    ui.add_space(4.0);
                    ui.label(RichText::new(card.description).color(palette.text_muted));
                });
            });
        }
    });
}
