//! egui renderer for the application UI.

use eframe::egui::{self, Margin, RichText};

use crate::egui_app::controller::EguiController;
use crate::egui_app::state::{BackendHealth, InputMethod, RequestPhase};

mod input_panel;
mod result_panel;
/// Palette and status tones.
pub mod style;

/// Smallest window that still fits both panels.
pub const MIN_VIEWPORT_SIZE: egui::Vec2 = egui::vec2(560.0, 520.0);

/// Renders the egui UI using the shared controller state.
pub struct EguiApp {
    controller: EguiController,
    visuals_set: bool,
}

impl EguiApp {
    /// Create the app, loading persisted configuration and kicking off the
    /// availability probe.
    pub fn new() -> Result<Self, String> {
        let mut controller = EguiController::new();
        controller
            .load_configuration()
            .map_err(|err| format!("Failed to load config: {err}"))?;
        controller.begin_health_probe();
        Ok(Self {
            controller,
            visuals_set: false,
        })
    }

    fn apply_visuals(&mut self, ctx: &egui::Context) {
        if self.visuals_set {
            return;
        }
        let mut visuals = egui::Visuals::dark();
        style::apply_visuals(&mut visuals);
        ctx.set_visuals(visuals);
        self.visuals_set = true;
    }

    fn render_top_bar(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::top("top_bar")
            .frame(
                egui::Frame::new()
                    .fill(palette.bg_tertiary)
                    .inner_margin(Margin::same(8)),
            )
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new("Email Classifier")
                            .strong()
                            .color(palette.text_primary),
                    );
                    ui.add_space(8.0);
                    ui.separator();
                    ui.add_space(8.0);
                    self.render_backend_badge(ui);
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            RichText::new(self.controller.api_base_url())
                                .small()
                                .color(palette.text_muted),
                        );
                    });
                });
            });
    }

    fn render_backend_badge(&self, ui: &mut egui::Ui) {
        let palette = style::palette();
        let (label, color) = match &self.controller.ui.backend {
            BackendHealth::Unknown => ("Service: unknown".to_string(), palette.text_muted),
            BackendHealth::Checking => ("Service: checking…".to_string(), palette.text_muted),
            BackendHealth::Available => (
                "Service: online".to_string(),
                style::status_badge_color(style::StatusTone::Info),
            ),
            BackendHealth::Unavailable(err) => (
                format!("Service: offline ({err})"),
                style::status_badge_color(style::StatusTone::Warning),
            ),
        };
        ui.label(RichText::new(label).small().color(color));
    }

    fn render_status(&mut self, ctx: &egui::Context) {
        let palette = style::palette();
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(palette.bg_primary)
                    .inner_margin(Margin::same(6)),
            )
            .show(ctx, |ui| {
                let status = self.controller.ui.status.clone();
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(format!("● {}", status.badge_label))
                            .small()
                            .color(status.badge_color),
                    );
                    ui.add_space(8.0);
                    ui.label(RichText::new(status.text).small().color(palette.text_muted));
                });
            });
    }

    /// Route files dropped anywhere on the window to the collector while the
    /// upload method is active.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        if self.controller.ui.input_method != InputMethod::Upload {
            return;
        }
        let dropped_files = ctx.input(|i| i.raw.dropped_files.clone());
        for file in dropped_files {
            self.controller.handle_dropped_file(file);
        }
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.apply_visuals(ctx);
        self.controller.poll_jobs();
        self.handle_dropped_files(ctx);

        self.render_top_bar(ctx);
        self.render_status(ctx);
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add_space(8.0);
                self.render_input_panel(ui);
                ui.add_space(12.0);
                self.render_error_panel(ui);
                self.render_result_panel(ui);
                ui.add_space(8.0);
            });
        });

        // Keep repainting while the spinner or the copy ack is on screen.
        if self.controller.ui.request == RequestPhase::InFlight
            || self.controller.copied_recently()
        {
            ctx.request_repaint_after(std::time::Duration::from_millis(100));
        }
    }
}
