use eframe::egui::{self, Align, Button, Color32, Layout, RichText, Sense, Vec2};

use super::Session;
use super::style;

/// Largest size of the selection preview on the upload card.
const PREVIEW_MAX: Vec2 = Vec2::new(320.0, 224.0);

enum UploadAction {
    Pick,
    Submit,
}

impl Session {
    pub(super) fn render_analyze_page(&mut self, ui: &mut egui::Ui) {
        Self::centered_column(ui, |ui| {
            self.render_page_header(ui);
            let has_result = self
                .workflow
                .as_ref()
                .is_some_and(|workflow| workflow.result().is_some());
            if has_result {
                self.render_results(ui);
            } else {
                self.render_upload_card(ui);
            }
        });
    }

    fn render_upload_card(&mut self, ui: &mut egui::Ui) {
        let palette = self.palette();
        let ctx = ui.ctx().clone();
        let Some(workflow) = self.workflow.as_ref() else {
            return;
        };
        let selection = workflow.selection().cloned();
        let error = workflow.error().map(str::to_string);
        let loading = workflow.is_loading();
        let can_submit = workflow.can_submit();
        let preview = selection
            .as_ref()
            .and_then(|selection| self.textures.texture(&ctx, workflow.previews(), selection.preview));
        let drop_hovered = self.drop_hovered;

        let mut action = None;
        style::card_frame(palette).show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.with_layout(Layout::top_down(Align::Center), |ui| {
                ui.label(RichText::new("Upload Your Food Image").size(24.0).strong());
                ui.add_space(16.0);

                let zone = style::drop_zone_frame(palette, drop_hovered)
                    .show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.with_layout(Layout::top_down(Align::Center), |ui| {
                            ui.label(
                                RichText::new("Drag & Drop Your Image")
                                    .size(20.0)
                                    .strong(),
                            );
                            ui.add_space(4.0);
                            ui.label(
                                RichText::new("or click to browse files").color(palette.text_muted),
                            );
                        });
                    })
                    .response;
                let zone = ui.interact(zone.rect, ui.id().with("drop_zone"), Sense::click());
                if zone.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                    action = Some(UploadAction::Pick);
                }
                ui.add_space(16.0);

                if let Some(selection) = &selection {
                    ui.horizontal_wrapped(|ui| {
                        ui.label(RichText::new("Selected:").size(16.0));
                        ui.label(
                            RichText::new(&selection.file.name)
                                .size(16.0)
                                .strong()
                                .color(palette.success),
                        );
                    });
                    if let Some(texture) = &preview {
                        ui.add_space(8.0);
                        ui.add(egui::Image::new(texture).max_size(PREVIEW_MAX).corner_radius(8.0));
                    }
                    ui.add_space(16.0);
                }

                let choose = Button::new(RichText::new("Choose File").strong().color(Color32::WHITE))
                    .fill(palette.accent)
                    .corner_radius(20.0)
                    .min_size(Vec2::new(140.0, 36.0));
                if ui.add(choose).clicked() {
                    action = Some(UploadAction::Pick);
                }

                if let Some(message) = &error {
                    ui.add_space(16.0);
                    style::error_frame(palette).show(ui, |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(RichText::new(format!("! {message}")).color(palette.error_text));
                    });
                }

                ui.add_space(20.0);
                let label = if loading { "Analyzing..." } else { "Predict Calories" };
                ui.horizontal(|ui| {
                    if loading {
                        ui.spinner();
                    }
                    let predict = Button::new(RichText::new(label).size(18.0).strong())
                        .corner_radius(24.0)
                        .min_size(Vec2::new(240.0, 44.0));
                    if ui.add_enabled(can_submit, predict).clicked() {
                        action = Some(UploadAction::Submit);
                    }
                });
            });
        });

        match action {
            Some(UploadAction::Pick) => self.pick_file_via_dialog(),
            Some(UploadAction::Submit) => {
                if let Some(workflow) = self.workflow.as_mut() {
                    if let Err(err) = workflow.submit() {
                        tracing::debug!("Submit refused: {err}");
                    }
                }
            }
            None => {}
        }
    }
}
