use eframe::egui::{self, Margin, RichText};

use super::EguiApp;
use super::style;
use crate::egui_app::state::InputMethod;

impl EguiApp {
    /// Render the email input panel: method toggle, editor or drop zone,
    /// and the submit/clear row.
    pub(super) fn render_input_panel(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        egui::Frame::new()
            .fill(palette.bg_secondary)
            .stroke(egui::Stroke::new(1.0, palette.panel_outline))
            .inner_margin(Margin::same(16))
            .show(ui, |ui| {
                ui.label(
                    RichText::new("STEP 1 — EMAIL INPUT")
                        .small()
                        .strong()
                        .color(palette.text_primary),
                );
                ui.label(
                    RichText::new("Choose how to provide the email for analysis")
                        .color(palette.text_muted),
                );
                ui.add_space(10.0);

                self.render_method_toggle(ui);
                ui.add_space(10.0);

                match self.controller.ui.input_method {
                    InputMethod::Upload => self.render_upload_zone(ui),
                    InputMethod::Text => self.render_text_editor(ui),
                }

                ui.add_space(12.0);
                self.render_submit_row(ui);
            });
    }

    fn render_method_toggle(&mut self, ui: &mut egui::Ui) {
        let mut switched_to = None;
        ui.horizontal(|ui| {
            let active = self.controller.ui.input_method;
            if ui
                .selectable_label(active == InputMethod::Upload, "📎 Upload a file")
                .clicked()
            {
                switched_to = Some(InputMethod::Upload);
            }
            if ui
                .selectable_label(active == InputMethod::Text, "📝 Type text")
                .clicked()
            {
                switched_to = Some(InputMethod::Text);
            }
        });
        if let Some(method) = switched_to {
            self.controller.set_input_method(method);
        }
    }

    fn render_text_editor(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let response = ui.add(
            egui::TextEdit::multiline(&mut self.controller.ui.email_text)
                .hint_text("Paste or type the email content here…")
                .desired_rows(10)
                .desired_width(f32::INFINITY),
        );
        if response.changed() {
            self.controller.note_text_edited();
        }
        ui.label(
            RichText::new(format!(
                "{} characters",
                self.controller.ui.email_text.chars().count()
            ))
            .small()
            .color(palette.text_muted),
        );
    }

    fn render_upload_zone(&mut self, ui: &mut egui::Ui) {
        if self.controller.ui.selected_file.is_some() {
            self.render_selected_file_card(ui);
        } else {
            self.render_empty_drop_target(ui);
        }
    }

    fn render_selected_file_card(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let Some(file) = self.controller.ui.selected_file.clone() else {
            return;
        };
        let mut clear_clicked = false;
        egui::Frame::new()
            .fill(palette.bg_tertiary)
            .stroke(egui::Stroke::new(1.0, palette.panel_outline))
            .inner_margin(Margin::same(12))
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let icon = if file.mime == "application/pdf" {
                        "📄"
                    } else {
                        "🗒"
                    };
                    ui.label(RichText::new(icon).size(22.0));
                    ui.vertical(|ui| {
                        ui.label(RichText::new(&file.name).color(palette.text_primary));
                        ui.label(
                            RichText::new(file.human_size())
                                .small()
                                .color(palette.text_muted),
                        );
                    });
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("✕ Remove").clicked() {
                            clear_clicked = true;
                        }
                    });
                });
            });
        if clear_clicked {
            self.controller.clear_file();
        }
    }

    fn render_empty_drop_target(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let hovering_files = ui.ctx().input(|i| !i.raw.hovered_files.is_empty());
        let stroke_color = if hovering_files {
            palette.accent
        } else {
            palette.panel_outline
        };
        let mut browse_clicked = false;
        egui::Frame::new()
            .stroke(egui::Stroke::new(1.0, stroke_color))
            .inner_margin(Margin::same(28))
            .show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("⬆").size(26.0).color(palette.text_muted));
                    ui.add_space(4.0);
                    ui.label(
                        RichText::new("Drag and drop your file here").color(palette.text_primary),
                    );
                    ui.label(
                        RichText::new("Accepted formats: .txt or .pdf")
                            .small()
                            .color(palette.text_muted),
                    );
                    ui.add_space(8.0);
                    if ui.button("Browse…").clicked() {
                        browse_clicked = true;
                    }
                });
            });
        if browse_clicked {
            self.controller.browse_for_file();
        }
    }

    fn render_submit_row(&mut self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let in_flight = self.controller.classify_in_flight();
        let can_submit = self.controller.can_submit() && !in_flight;
        let has_content = !self.controller.ui.email_text.is_empty()
            || self.controller.ui.selected_file.is_some();

        let mut submit_clicked = false;
        let mut reset_clicked = false;
        ui.horizontal(|ui| {
            if ui
                .add_enabled(can_submit, egui::Button::new("Analyze email"))
                .clicked()
            {
                submit_clicked = true;
            }
            if has_content
                && ui
                    .add_enabled(!in_flight, egui::Button::new("Clear"))
                    .clicked()
            {
                reset_clicked = true;
            }
            if in_flight {
                ui.add_space(8.0);
                ui.add(egui::Spinner::new().size(16.0));
                ui.label(RichText::new("Processing…").color(palette.text_muted));
            }
        });

        if submit_clicked {
            self.controller.submit();
        }
        if reset_clicked {
            self.controller.reset();
        }
    }
}
