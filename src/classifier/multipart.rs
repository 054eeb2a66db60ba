//! Minimal `multipart/form-data` encoder for the assistant endpoint.
//!
//! The HTTP stack (`ureq`) has no multipart support, and the service contract
//! is a single-field form, so the body is assembled by hand. The wire layout
//! follows RFC 7578: each part is delimited by `--{boundary}`, headers are
//! separated from content by a blank line, and the body ends with
//! `--{boundary}--`.

use rand::distr::{Alphanumeric, SampleString};

/// Incrementally built multipart/form-data request body.
#[derive(Clone, Debug)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

impl MultipartForm {
    /// Create a form with a freshly generated boundary.
    pub fn new() -> Self {
        let suffix = Alphanumeric.sample_string(&mut rand::rng(), 24);
        Self::with_boundary(format!("----mailtriage-{suffix}"))
    }

    /// Create a form with an explicit boundary. Exposed so tests can assert
    /// the exact body layout.
    pub fn with_boundary(boundary: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            body: Vec::new(),
        }
    }

    /// Append a plain text field.
    pub fn text_field(mut self, name: &str, value: &str) -> Self {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{name}\"\r\n"
        ));
        self.body.extend_from_slice(value.as_bytes());
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// Append a binary file field with a filename and part content type.
    pub fn file_field(mut self, name: &str, filename: &str, content_type: &str, bytes: &[u8]) -> Self {
        self.open_part(&format!(
            "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\
             Content-Type: {content_type}\r\n"
        ));
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    /// The `Content-Type` header value for this form.
    pub fn content_type(&self) -> String {
        format!("multipart/form-data; boundary={}", self.boundary)
    }

    /// Terminate the body and return `(content_type, body)`.
    pub fn finish(mut self) -> (String, Vec<u8>) {
        let content_type = self.content_type();
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());
        (content_type, self.body)
    }

    fn open_part(&mut self, headers: &str) {
        self.body
            .extend_from_slice(format!("--{}\r\n", self.boundary).as_bytes());
        self.body.extend_from_slice(headers.as_bytes());
        self.body.extend_from_slice(b"\r\n");
    }
}

impl Default for MultipartForm {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_field_matches_wire_layout() {
        let (content_type, body) = MultipartForm::with_boundary("X")
            .text_field("email_text", "hello world")
            .finish();
        assert_eq!(content_type, "multipart/form-data; boundary=X");
        let expected = "--X\r\n\
                        Content-Disposition: form-data; name=\"email_text\"\r\n\
                        \r\n\
                        hello world\r\n\
                        --X--\r\n";
        assert_eq!(String::from_utf8(body).unwrap(), expected);
    }

    #[test]
    fn file_field_carries_filename_and_content_type() {
        let (_, body) = MultipartForm::with_boundary("B")
            .file_field("file", "email.pdf", "application/pdf", b"%PDF-1.4")
            .finish();
        let expected = "--B\r\n\
                        Content-Disposition: form-data; name=\"file\"; filename=\"email.pdf\"\r\n\
                        Content-Type: application/pdf\r\n\
                        \r\n\
                        %PDF-1.4\r\n\
                        --B--\r\n";
        assert_eq!(String::from_utf8(body).unwrap(), expected);
    }

    #[test]
    fn generated_boundaries_are_unique_and_header_safe() {
        let a = MultipartForm::new();
        let b = MultipartForm::new();
        assert_ne!(a.content_type(), b.content_type());
        assert!(
            a.content_type()
                .chars()
                .all(|ch| ch.is_ascii_graphic() || ch == ' ')
        );
    }
}
