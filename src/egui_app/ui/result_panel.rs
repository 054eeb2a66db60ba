use eframe::egui::{self, Margin, RichText};

use super::EguiApp;
use super::style;
use crate::egui_app::state::{Category, ClassificationView, RequestPhase};

impl EguiApp {
    /// Render the inline alert for a failed submission, if any.
    pub(super) fn render_error_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let Some(error) = self.controller.ui.error.clone() else {
            return;
        };
        egui::Frame::new()
            .fill(palette.bg_secondary)
            .stroke(egui::Stroke::new(1.0, palette.destructive))
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(RichText::new("⚠").size(20.0).color(palette.destructive));
                    ui.vertical(|ui| {
                        ui.label(
                            RichText::new("Processing failed")
                                .strong()
                                .color(palette.destructive),
                        );
                        ui.label(RichText::new(error).color(palette.text_muted));
                    });
                });
            });
        ui.add_space(12.0);
    }

    /// Render the analysis panel: spinner while in flight, result afterwards.
    pub(super) fn render_result_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let phase = self.controller.ui.request;
        let in_flight = phase == RequestPhase::InFlight;
        let result = self.controller.ui.result.clone();
        if !in_flight && result.is_none() {
            return;
        }

        egui::Frame::new()
            .fill(palette.bg_secondary)
            .stroke(egui::Stroke::new(1.0, palette.panel_outline))
            .inner_margin(Margin::same(16))
            .show(ui, |ui| {
                ui.label(
                    RichText::new("STEP 2 — ANALYSIS RESULT")
                        .small()
                        .strong()
                        .color(palette.text_primary),
                );
                ui.label(
                    RichText::new("Classification and suggested reply")
                        .color(palette.text_muted),
                );
                ui.add_space(10.0);

                if in_flight {
                    ui.vertical_centered(|ui| {
                        ui.add_space(24.0);
                        ui.add(egui::Spinner::new().size(32.0));
                        ui.add_space(8.0);
                        ui.label(
                            RichText::new("Analyzing email content…").color(palette.text_muted),
                        );
                        ui.add_space(24.0);
                    });
                } else if let Some(view) = result {
                    self.render_classification(ui, &view);
                }
            });
    }

    fn render_classification(&mut self, ui: &mut egui::Ui, view: &ClassificationView) {
        let palette = style::palette();
        let (icon, tone_color) = match view.category {
            Category::Productive => ("✔", palette.success),
            Category::Unproductive => ("✘", palette.destructive),
        };

        ui.horizontal(|ui| {
            ui.label(RichText::new(icon).size(24.0).color(tone_color));
            ui.vertical(|ui| {
                ui.label(RichText::new("CATEGORY").small().color(palette.text_muted));
                ui.label(
                    RichText::new(view.category.label())
                        .strong()
                        .size(18.0)
                        .color(tone_color),
                );
            });
        });
        ui.add_space(10.0);

        ui.label(
            RichText::new("CONFIDENCE")
                .small()
                .color(palette.text_muted),
        );
        ui.label(
            RichText::new(view.confidence_display())
                .strong()
                .size(18.0)
                .color(palette.text_primary),
        );
        ui.add(
            egui::ProgressBar::new(view.confidence_fraction())
                .desired_width(ui.available_width())
                .fill(palette.accent),
        );
        ui.add_space(14.0);

        self.render_suggested_response(ui, &view.suggested_response);
    }

    fn render_suggested_response(&mut self, ui: &mut egui::Ui, content: &str) {
        let palette = style::palette();
        let mut copy_clicked = false;
        egui::Frame::new()
            .stroke(egui::Stroke::new(1.0, palette.accent))
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("SUGGESTED RESPONSE")
                            .small()
                            .strong()
                            .color(palette.text_primary),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if self.controller.copied_recently() {
                            ui.label(
                                RichText::new("✔ Copied")
                                    .small()
                                    .color(palette.success),
                            );
                        } else if ui.small_button("Copy").clicked() {
                            copy_clicked = true;
                        }
                    });
                });
                ui.separator();
                ui.label(RichText::new(content).color(palette.text_primary));
            });
        if copy_clicked {
            // Fire and forget: clipboard failures are not surfaced.
            ui.ctx().copy_text(content.to_string());
            self.controller.mark_copied();
        }
    }
}
