//! Maintains app state and bridges the classifier client to the egui UI.

use std::path::Path;
use std::time::{Duration, Instant};

use rfd::FileDialog;

use crate::classifier::{ClassifyRequest, EmailFile};
use crate::config;
use crate::egui_app::state::{
    BackendHealth, ClassificationView, InputMethod, RequestPhase, SelectedFile, StatusBarState,
    UiState, file_allow_listed, mime_for_name,
};
use crate::egui_app::ui::style::{self, StatusTone};

pub(crate) mod jobs;

use jobs::JobMessage;

/// How long the "Copied" acknowledgment stays visible.
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

/// Maintains app state and dispatches background work.
pub struct EguiController {
    pub ui: UiState,
    pub(crate) jobs: jobs::ControllerJobs,
    api_base_url: String,
}

impl Default for EguiController {
    fn default() -> Self {
        Self::new()
    }
}

impl EguiController {
    pub fn new() -> Self {
        Self {
            ui: UiState::default(),
            jobs: jobs::ControllerJobs::new(),
            api_base_url: config::DEFAULT_API_BASE_URL.to_string(),
        }
    }

    /// Load persisted config and resolve the service base URL.
    pub fn load_configuration(&mut self) -> Result<(), config::ConfigError> {
        let cfg = config::load_or_default()?;
        self.api_base_url = cfg.resolved_api_base_url();
        tracing::info!("Using classification service at {}", self.api_base_url);
        Ok(())
    }

    /// Base URL of the classification service for this session.
    pub fn api_base_url(&self) -> &str {
        &self.api_base_url
    }

    /// Point the controller at a different service instance.
    pub fn set_api_base_url(&mut self, base_url: impl Into<String>) {
        self.api_base_url = base_url.into();
    }

    /// Switch the input method. Discards the displayed result, keeping both
    /// drafts so the user can switch back.
    pub fn set_input_method(&mut self, method: InputMethod) {
        if self.ui.input_method == method {
            return;
        }
        self.ui.input_method = method;
        self.ui.result = None;
        if self.ui.request == RequestPhase::Succeeded {
            self.ui.request = RequestPhase::Idle;
        }
    }

    /// Drop the stale result when the draft text changes underneath it.
    pub fn note_text_edited(&mut self) {
        self.ui.result = None;
    }

    /// Stage a file in the collector, replacing any previous selection.
    pub fn select_file(&mut self, file: SelectedFile) {
        self.ui.selected_file = Some(file);
        self.ui.result = None;
        self.ui.error = None;
    }

    /// Stage the file at `path` if it passes the allow-list. Disallowed
    /// types are ignored without a surfaced error.
    pub fn try_select_file_from_path(&mut self, path: &Path) {
        let Some(name) = path.file_name().and_then(|name| name.to_str()) else {
            return;
        };
        let name = name.to_string();
        let mime = mime_for_name(&name);
        if !file_allow_listed(&name, mime) {
            tracing::debug!("Ignoring disallowed file type: {name}");
            return;
        }
        match std::fs::read(path) {
            Ok(bytes) => self.select_file(SelectedFile {
                name,
                mime: mime.to_string(),
                bytes,
            }),
            Err(err) => {
                self.set_status(format!("Could not read {name}: {err}"), StatusTone::Warning);
            }
        }
    }

    /// Stage a file dropped onto the window. Native drops carry a path;
    /// in-memory drops carry bytes.
    pub fn handle_dropped_file(&mut self, file: egui::DroppedFile) {
        if let Some(path) = file.path {
            self.try_select_file_from_path(&path);
            return;
        }
        let Some(bytes) = file.bytes else {
            return;
        };
        if !file_allow_listed(&file.name, &file.mime) {
            tracing::debug!("Ignoring disallowed dropped file: {}", file.name);
            return;
        }
        let mime = if file.mime.is_empty() {
            mime_for_name(&file.name).to_string()
        } else {
            file.mime
        };
        self.select_file(SelectedFile {
            name: file.name,
            mime,
            bytes: bytes.to_vec(),
        });
    }

    /// Open a native file dialog filtered to the accepted formats.
    pub fn browse_for_file(&mut self) {
        let Some(path) = FileDialog::new()
            .add_filter("Email files", &["pdf", "txt"])
            .pick_file()
        else {
            return;
        };
        self.try_select_file_from_path(&path);
    }

    /// Clear the staged file, returning the collector to its empty state.
    pub fn clear_file(&mut self) {
        self.ui.selected_file = None;
    }

    /// Clear drafts, result, and error.
    pub fn reset(&mut self) {
        self.ui.email_text.clear();
        self.ui.selected_file = None;
        self.ui.result = None;
        self.ui.error = None;
        if self.ui.request != RequestPhase::InFlight {
            self.ui.request = RequestPhase::Idle;
        }
    }

    /// Whether the current input method has content to submit.
    pub fn can_submit(&self) -> bool {
        match self.ui.input_method {
            InputMethod::Text => !self.ui.email_text.trim().is_empty(),
            InputMethod::Upload => self.ui.selected_file.is_some(),
        }
    }

    /// Whether a classification call is currently outstanding.
    pub fn classify_in_flight(&self) -> bool {
        self.ui.request == RequestPhase::InFlight
    }

    /// Submit the active input for classification. A no-op while a request
    /// is outstanding; local validation failures surface without a network
    /// call.
    pub fn submit(&mut self) {
        if self.jobs.classify_in_progress() {
            return;
        }
        let request = match self.ui.input_method {
            InputMethod::Text => ClassifyRequest::Text(self.ui.email_text.clone()),
            InputMethod::Upload => match &self.ui.selected_file {
                Some(file) => ClassifyRequest::File(EmailFile {
                    name: file.name.clone(),
                    mime: file.mime.clone(),
                    bytes: file.bytes.clone(),
                }),
                None => {
                    self.ui.error = Some("Please select a PDF file".to_string());
                    self.ui.request = RequestPhase::Failed;
                    return;
                }
            },
        };
        self.ui.request = RequestPhase::InFlight;
        self.ui.result = None;
        self.ui.error = None;
        self.ui.copied_at = None;
        self.set_status("Analyzing email…", StatusTone::Info);
        self.jobs.begin_classify(self.api_base_url.clone(), request);
    }

    /// Probe service availability once, in the background.
    pub fn begin_health_probe(&mut self) {
        self.ui.backend = BackendHealth::Checking;
        self.jobs.begin_health_check(self.api_base_url.clone());
    }

    /// Drain finished background jobs and fold their outcomes into UI state.
    pub fn poll_jobs(&mut self) {
        while let Ok(message) = self.jobs.try_recv_message() {
            match message {
                JobMessage::ClassifyFinished(outcome) => {
                    self.jobs.clear_classify();
                    match outcome {
                        Ok(wire) => {
                            self.ui.result = Some(ClassificationView::from_wire(wire));
                            self.ui.request = RequestPhase::Succeeded;
                            self.set_status("Email classified", StatusTone::Info);
                        }
                        Err(err) => {
                            self.ui.error = Some(err.to_string());
                            self.ui.request = RequestPhase::Failed;
                            self.set_status("Classification failed", StatusTone::Error);
                        }
                    }
                }
                JobMessage::HealthChecked(outcome) => {
                    self.jobs.clear_health_check();
                    match outcome {
                        Ok(health) => {
                            tracing::info!("Classification service healthy: {}", health.status);
                            self.ui.backend = BackendHealth::Available;
                        }
                        Err(err) => {
                            tracing::warn!("Classification service unavailable: {err}");
                            self.ui.backend = BackendHealth::Unavailable(err.to_string());
                            self.set_status(
                                "Classification service unavailable",
                                StatusTone::Warning,
                            );
                        }
                    }
                }
            }
        }
    }

    /// Record a clipboard copy so the UI can show the acknowledgment.
    pub fn mark_copied(&mut self) {
        self.ui.copied_at = Some(Instant::now());
    }

    /// Whether the copy acknowledgment window is still open.
    pub fn copied_recently(&self) -> bool {
        self.ui
            .copied_at
            .is_some_and(|at| at.elapsed() < COPY_ACK_WINDOW)
    }

    /// Update the footer status line.
    pub fn set_status(&mut self, text: impl Into<String>, tone: StatusTone) {
        self.ui.status = StatusBarState {
            text: text.into(),
            badge_label: tone.label().to_string(),
            badge_color: style::status_badge_color(tone),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::Classification;
    use std::time::Duration;

    fn controller_with_result() -> EguiController {
        let mut controller = EguiController::new();
        controller.ui.result = Some(ClassificationView {
            category: crate::egui_app::state::Category::Productive,
            confidence_pct: 92.0,
            suggested_response: "X".to_string(),
        });
        controller.ui.request = RequestPhase::Succeeded;
        controller
    }

    fn pdf_file(bytes: Vec<u8>) -> SelectedFile {
        SelectedFile {
            name: "mail.pdf".to_string(),
            mime: "application/pdf".to_string(),
            bytes,
        }
    }

    #[test]
    fn switching_input_method_clears_result_but_keeps_drafts() {
        let mut controller = controller_with_result();
        controller.ui.email_text = "draft".to_string();
        controller.ui.selected_file = Some(pdf_file(b"%PDF".to_vec()));

        controller.set_input_method(InputMethod::Text);

        assert!(controller.ui.result.is_none());
        assert_eq!(controller.ui.request, RequestPhase::Idle);
        assert_eq!(controller.ui.email_text, "draft");
        assert!(controller.ui.selected_file.is_some());
    }

    #[test]
    fn switching_to_same_method_keeps_result() {
        let mut controller = controller_with_result();
        controller.set_input_method(InputMethod::Upload);
        assert!(controller.ui.result.is_some());
    }

    #[test]
    fn clearing_file_returns_collector_to_empty_state() {
        let mut controller = EguiController::new();
        controller.select_file(pdf_file(b"%PDF".to_vec()));
        assert!(controller.ui.selected_file.is_some());

        controller.clear_file();
        assert!(controller.ui.selected_file.is_none());
    }

    #[test]
    fn selecting_a_file_clears_previous_result_and_error() {
        let mut controller = controller_with_result();
        controller.ui.error = Some("old".to_string());

        controller.select_file(pdf_file(b"%PDF".to_vec()));

        assert!(controller.ui.result.is_none());
        assert!(controller.ui.error.is_none());
    }

    #[test]
    fn disallowed_dropped_file_is_silently_ignored() {
        let mut controller = EguiController::new();
        controller.handle_dropped_file(egui::DroppedFile {
            name: "mail.docx".to_string(),
            bytes: Some(std::sync::Arc::from(b"data".as_slice())),
            ..Default::default()
        });
        assert!(controller.ui.selected_file.is_none());
    }

    #[test]
    fn dropped_bytes_are_staged_with_derived_mime() {
        let mut controller = EguiController::new();
        controller.handle_dropped_file(egui::DroppedFile {
            name: "mail.pdf".to_string(),
            bytes: Some(std::sync::Arc::from(b"%PDF".as_slice())),
            ..Default::default()
        });
        let file = controller.ui.selected_file.as_ref().unwrap();
        assert_eq!(file.mime, "application/pdf");
        assert_eq!(file.bytes, b"%PDF");
    }

    #[test]
    fn reset_clears_everything() {
        let mut controller = controller_with_result();
        controller.ui.email_text = "draft".to_string();
        controller.ui.selected_file = Some(pdf_file(b"%PDF".to_vec()));
        controller.ui.error = Some("boom".to_string());

        controller.reset();

        assert!(controller.ui.email_text.is_empty());
        assert!(controller.ui.selected_file.is_none());
        assert!(controller.ui.result.is_none());
        assert!(controller.ui.error.is_none());
        assert_eq!(controller.ui.request, RequestPhase::Idle);
    }

    #[test]
    fn submit_without_file_fails_locally() {
        let mut controller = EguiController::new();
        controller.submit();
        assert_eq!(controller.ui.request, RequestPhase::Failed);
        assert_eq!(
            controller.ui.error.as_deref(),
            Some("Please select a PDF file")
        );
        assert!(!controller.jobs.classify_in_progress());
    }

    #[test]
    fn can_submit_tracks_active_method() {
        let mut controller = EguiController::new();
        assert!(!controller.can_submit());
        controller.ui.email_text = "  hello  ".to_string();
        assert!(!controller.can_submit());
        controller.set_input_method(InputMethod::Text);
        assert!(controller.can_submit());
        controller.ui.email_text = "   ".to_string();
        assert!(!controller.can_submit());
    }

    #[test]
    fn classify_outcome_transitions_to_succeeded() {
        let mut controller = EguiController::new();
        controller.ui.request = RequestPhase::InFlight;
        controller
            .jobs
            .message_sender()
            .send(JobMessage::ClassifyFinished(Ok(Classification {
                is_productive: true,
                confidence: 0.92,
                suggested_response: "X".to_string(),
            })))
            .unwrap();

        controller.poll_jobs();

        assert_eq!(controller.ui.request, RequestPhase::Succeeded);
        let view = controller.ui.result.as_ref().unwrap();
        assert_eq!(view.confidence_display(), "92.0%");
        assert_eq!(view.suggested_response, "X");
    }

    #[test]
    fn classify_error_transitions_to_failed_with_message() {
        let mut controller = EguiController::new();
        controller.ui.request = RequestPhase::InFlight;
        controller
            .jobs
            .message_sender()
            .send(JobMessage::ClassifyFinished(Err(
                crate::classifier::ClassifyError::Api("bad file".to_string()),
            )))
            .unwrap();

        controller.poll_jobs();

        assert_eq!(controller.ui.request, RequestPhase::Failed);
        assert_eq!(controller.ui.error.as_deref(), Some("bad file"));
    }

    #[test]
    fn submit_is_guarded_while_a_request_is_outstanding() {
        let mut controller = EguiController::new();
        controller.set_input_method(InputMethod::Text);
        controller.ui.email_text = "hello".to_string();
        // Unroutable port: the worker fails fast with a transport error.
        controller.api_base_url = "http://127.0.0.1:1".to_string();

        controller.submit();
        assert!(controller.jobs.classify_in_progress());
        assert_eq!(controller.ui.request, RequestPhase::InFlight);

        // Second submit while outstanding is a no-op.
        controller.submit();
        assert!(controller.jobs.classify_in_progress());

        for _ in 0..200 {
            controller.poll_jobs();
            if controller.ui.request != RequestPhase::InFlight {
                break;
            }
            std::thread::sleep(Duration::from_millis(10));
        }
        assert_eq!(controller.ui.request, RequestPhase::Failed);
        assert!(!controller.jobs.classify_in_progress());
    }

    #[test]
    fn copy_acknowledgment_expires() {
        let mut controller = EguiController::new();
        assert!(!controller.copied_recently());
        controller.mark_copied();
        assert!(controller.copied_recently());
        controller.ui.copied_at = Instant::now().checked_sub(Duration::from_secs(3));
        assert!(!controller.copied_recently());
    }
}
