//! Shared state types for the egui UI.

use std::time::Instant;

use egui::Color32;

use crate::classifier::Classification;
use crate::egui_app::ui::style;

/// How the user is providing the email for this attempt.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum InputMethod {
    /// A selected or dropped file.
    #[default]
    Upload,
    /// Pasted/typed text.
    Text,
}

/// Where the current submission stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RequestPhase {
    #[default]
    Idle,
    InFlight,
    Succeeded,
    Failed,
}

/// Service verdict for one email.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Productive,
    Unproductive,
}

impl Category {
    pub fn label(self) -> &'static str {
        match self {
            Self::Productive => "Productive",
            Self::Unproductive => "Unproductive",
        }
    }
}

/// Classification result shaped for rendering. Replaced wholesale on the
/// next submission.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationView {
    pub category: Category,
    /// Confidence rescaled to a percentage for display.
    pub confidence_pct: f32,
    pub suggested_response: String,
}

impl ClassificationView {
    /// Map the wire response onto the display shape.
    pub fn from_wire(wire: Classification) -> Self {
        let category = if wire.is_productive {
            Category::Productive
        } else {
            Category::Unproductive
        };
        Self {
            category,
            confidence_pct: (wire.confidence * 100.0) as f32,
            suggested_response: wire.suggested_response,
        }
    }

    /// Confidence formatted for the badge, e.g. `92.0%`.
    pub fn confidence_display(&self) -> String {
        format!("{:.1}%", self.confidence_pct)
    }

    /// Confidence as a 0..=1 fraction for the bar widget.
    pub fn confidence_fraction(&self) -> f32 {
        (self.confidence_pct / 100.0).clamp(0.0, 1.0)
    }
}

/// A file staged in the collector, with its content already read.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    /// Human-readable size for the file card.
    pub fn human_size(&self) -> String {
        let bytes = self.bytes.len() as f64;
        if bytes < 1024.0 {
            format!("{} bytes", self.bytes.len())
        } else if bytes < 1024.0 * 1024.0 {
            format!("{:.1} KB", bytes / 1024.0)
        } else {
            format!("{:.1} MB", bytes / (1024.0 * 1024.0))
        }
    }
}

/// Whether the collector accepts a file with this name/type.
///
/// The allow-list mirrors the accepted formats shown in the drop zone;
/// files failing it are ignored without a surfaced error.
pub fn file_allow_listed(name: &str, mime: &str) -> bool {
    if mime == "text/plain" || mime == "application/pdf" {
        return true;
    }
    let lowered = name.to_ascii_lowercase();
    lowered.ends_with(".txt") || lowered.ends_with(".pdf")
}

/// Best-effort content type derived from the file name.
pub fn mime_for_name(name: &str) -> &'static str {
    let lowered = name.to_ascii_lowercase();
    if lowered.ends_with(".pdf") {
        "application/pdf"
    } else if lowered.ends_with(".txt") {
        "text/plain"
    } else {
        "application/octet-stream"
    }
}

/// Last known availability of the classification service.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum BackendHealth {
    #[default]
    Unknown,
    Checking,
    Available,
    Unavailable(String),
}

/// Status badge + text shown in the footer.
#[derive(Clone, Debug, PartialEq)]
pub struct StatusBarState {
    pub text: String,
    pub badge_label: String,
    pub badge_color: Color32,
}

impl StatusBarState {
    pub fn idle() -> Self {
        Self {
            text: "Paste an email or drop a file to get started".into(),
            badge_label: "Idle".into(),
            badge_color: style::status_badge_color(style::StatusTone::Idle),
        }
    }
}

/// Top-level UI model consumed by the egui renderer.
#[derive(Clone, Debug)]
pub struct UiState {
    pub input_method: InputMethod,
    /// Draft text for the text input method. Kept when switching methods.
    pub email_text: String,
    pub selected_file: Option<SelectedFile>,
    pub request: RequestPhase,
    pub result: Option<ClassificationView>,
    pub error: Option<String>,
    /// When the suggested response was last copied, for the ack window.
    pub copied_at: Option<Instant>,
    pub backend: BackendHealth,
    pub status: StatusBarState,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            input_method: InputMethod::default(),
            email_text: String::new(),
            selected_file: None,
            request: RequestPhase::default(),
            result: None,
            error: None,
            copied_at: None,
            backend: BackendHealth::default(),
            status: StatusBarState::idle(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(is_productive: bool, confidence: f64) -> Classification {
        Classification {
            is_productive,
            confidence,
            suggested_response: "X".to_string(),
        }
    }

    #[test]
    fn maps_productive_wire_result_to_percentage_display() {
        let view = ClassificationView::from_wire(wire(true, 0.92));
        assert_eq!(view.category, Category::Productive);
        assert_eq!(view.confidence_display(), "92.0%");
        assert_eq!(view.suggested_response, "X");
    }

    #[test]
    fn maps_unproductive_wire_result() {
        let view = ClassificationView::from_wire(wire(false, 0.305));
        assert_eq!(view.category, Category::Unproductive);
        assert_eq!(view.confidence_display(), "30.5%");
    }

    #[test]
    fn confidence_fraction_is_clamped() {
        let view = ClassificationView::from_wire(wire(true, 1.7));
        assert_eq!(view.confidence_fraction(), 1.0);
    }

    #[test]
    fn allow_list_accepts_known_types_and_extensions() {
        assert!(file_allow_listed("mail.pdf", ""));
        assert!(file_allow_listed("mail.TXT", ""));
        assert!(file_allow_listed("whatever", "text/plain"));
        assert!(file_allow_listed("whatever", "application/pdf"));
        assert!(!file_allow_listed("mail.docx", "application/msword"));
    }

    #[test]
    fn mime_is_derived_from_extension() {
        assert_eq!(mime_for_name("a.pdf"), "application/pdf");
        assert_eq!(mime_for_name("a.txt"), "text/plain");
        assert_eq!(mime_for_name("a.bin"), "application/octet-stream");
    }

    #[test]
    fn human_size_formats_by_magnitude() {
        let mut file = SelectedFile {
            name: "a.pdf".into(),
            mime: "application/pdf".into(),
            bytes: vec![0u8; 512],
        };
        assert_eq!(file.human_size(), "512 bytes");
        file.bytes = vec![0u8; 2048];
        assert_eq!(file.human_size(), "2.0 KB");
        file.bytes = vec![0u8; 3 * 1024 * 1024];
        assert_eq!(file.human_size(), "3.0 MB");
    }
}
