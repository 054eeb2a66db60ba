//! Assistant endpoint client: request marshaling and fault unwrapping.

use serde::Deserialize;

use crate::http_client;

use super::multipart::MultipartForm;

/// Path of the classification endpoint, relative to the base URL.
pub const ASSISTANT_PATH: &str = "/api/v1/assistant";
/// Path of the availability probe, relative to the base URL.
pub const HEALTH_PATH: &str = "/health";
/// Largest file the service accepts.
pub const MAX_FILE_SIZE_BYTES: usize = 10 * 1024 * 1024;
/// The only file content type the service accepts.
pub const PDF_MIME: &str = "application/pdf";

const MAX_RESPONSE_BYTES: usize = 1024 * 1024;
const GENERIC_TEXT_ERROR: &str = "Failed to classify email";
const GENERIC_FILE_ERROR: &str = "Failed to classify email from PDF";

/// Successful classification returned by the service.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct Classification {
    pub is_productive: bool,
    pub confidence: f64,
    pub suggested_response: String,
}

/// Body of the availability probe.
#[derive(Clone, Debug, Deserialize)]
pub struct HealthStatus {
    pub status: String,
}

/// A file staged for classification.
#[derive(Clone, Debug)]
pub struct EmailFile {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// One classification submission, built from UI state at submit time.
#[derive(Clone, Debug)]
pub enum ClassifyRequest {
    Text(String),
    File(EmailFile),
}

/// Errors surfaced to the UI for a single submission attempt.
#[derive(Debug, thiserror::Error)]
pub enum ClassifyError {
    /// Text submission was empty after trimming. No request is issued.
    #[error("Please enter the email text")]
    EmptyText,
    /// File is not a PDF. No request is issued.
    #[error("Only PDF files are supported")]
    InvalidFileType,
    /// File exceeds the service limit. No request is issued.
    #[error("File size exceeds maximum limit of 10MB")]
    FileTooLarge,
    /// The service answered with a non-success status.
    #[error("{0}")]
    Api(String),
    /// The service could not be reached.
    #[error("Service unreachable: {0}")]
    Transport(String),
    /// The service answered with a body this client cannot interpret.
    #[error("Invalid response: {0}")]
    Json(String),
}

/// Classify a submission, dispatching on its kind.
pub fn classify(base_url: &str, request: &ClassifyRequest) -> Result<Classification, ClassifyError> {
    match request {
        ClassifyRequest::Text(text) => classify_text(base_url, text),
        ClassifyRequest::File(file) => classify_file(base_url, file),
    }
}

/// Classify pasted email text.
///
/// The text is sent exactly as given in the `email_text` form field;
/// emptiness is judged on the trimmed value.
pub fn classify_text(base_url: &str, email_text: &str) -> Result<Classification, ClassifyError> {
    if email_text.trim().is_empty() {
        return Err(ClassifyError::EmptyText);
    }
    let form = MultipartForm::new().text_field("email_text", email_text);
    post_assistant(base_url, form, GENERIC_TEXT_ERROR)
}

/// Classify an uploaded PDF.
///
/// Type and size are validated locally; violations never reach the network.
pub fn classify_file(base_url: &str, file: &EmailFile) -> Result<Classification, ClassifyError> {
    if file.mime != PDF_MIME {
        return Err(ClassifyError::InvalidFileType);
    }
    if file.bytes.len() > MAX_FILE_SIZE_BYTES {
        return Err(ClassifyError::FileTooLarge);
    }
    let form = MultipartForm::new().file_field("file", &file.name, PDF_MIME, &file.bytes);
    post_assistant(base_url, form, GENERIC_FILE_ERROR)
}

/// Probe service availability via `GET /health`.
pub fn check_health(base_url: &str) -> Result<HealthStatus, ClassifyError> {
    let url = join_url(base_url, HEALTH_PATH);
    let response = match http_client::agent().get(&url).call() {
        Ok(response) => response,
        Err(ureq::Error::Status(_, _)) => {
            return Err(ClassifyError::Api("API is not available".to_string()));
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(ClassifyError::Transport(err.to_string()));
        }
    };
    let body = read_body(response)?;
    serde_json::from_str(&body).map_err(|err| ClassifyError::Json(err.to_string()))
}

fn post_assistant(
    base_url: &str,
    form: MultipartForm,
    generic_error: &str,
) -> Result<Classification, ClassifyError> {
    let url = join_url(base_url, ASSISTANT_PATH);
    let (content_type, body) = form.finish();
    let request = http_client::agent()
        .post(&url)
        .set("Accept", "application/json")
        .set("Content-Type", &content_type);

    let response = match request.send_bytes(&body) {
        Ok(response) => response,
        Err(ureq::Error::Status(code, response)) => {
            let body = read_body(response).unwrap_or_default();
            tracing::warn!("Assistant request failed with HTTP {code}");
            return Err(ClassifyError::Api(extract_error_message(
                &body,
                generic_error,
            )));
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(ClassifyError::Transport(err.to_string()));
        }
    };

    let body = read_body(response)?;
    serde_json::from_str(&body).map_err(|err| ClassifyError::Json(err.to_string()))
}

fn join_url(base_url: &str, path: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), path)
}

fn read_body(response: ureq::Response) -> Result<String, ClassifyError> {
    http_client::read_body_string(response, MAX_RESPONSE_BYTES)
        .map_err(|err| ClassifyError::Json(err.to_string()))
}

#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
    detail: Option<String>,
}

/// Pick the surfaced error text from a failure body.
///
/// Preference order is `message`, then `error`, then `detail`; blank fields
/// are skipped, and unparseable bodies fall back to the generic phrase.
fn extract_error_message(body: &str, generic: &str) -> String {
    let parsed: ErrorBody = serde_json::from_str(body.trim()).unwrap_or_default();
    [parsed.message, parsed.error, parsed.detail]
        .into_iter()
        .flatten()
        .find(|field| !field.trim().is_empty())
        .unwrap_or_else(|| generic.to_string())
}
