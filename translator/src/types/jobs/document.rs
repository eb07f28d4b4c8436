use crate::error::job::JobError;
use crate::types::constant::{PDF_CONTENT_TYPE, PDF_EXTENSION, TEXT_CONTENT_TYPE};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;

/// How a document travels through the pipeline.
///
/// Binary documents are carried as base64 text between components and stored as raw bytes.
/// Plain text is carried and stored verbatim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentKind {
    PlainText,
    Binary,
}

impl DocumentKind {
    pub fn from_content_type(content_type: &str) -> Self {
        if content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE) {
            DocumentKind::Binary
        } else {
            DocumentKind::PlainText
        }
    }

    pub fn from_file_name(file_name: &str) -> Self {
        if file_name.to_lowercase().ends_with(PDF_EXTENSION) {
            DocumentKind::Binary
        } else {
            DocumentKind::PlainText
        }
    }

    /// An explicit content type wins over the file extension.
    pub fn detect(file_name: &str, content_type: Option<&str>) -> Self {
        match content_type {
            Some(content_type) => Self::from_content_type(content_type),
            None => Self::from_file_name(file_name),
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            DocumentKind::PlainText => TEXT_CONTENT_TYPE,
            DocumentKind::Binary => PDF_CONTENT_TYPE,
        }
    }

    /// Turns transport text into the bytes that get stored.
    pub fn decode_transport(&self, content: &str) -> Result<Bytes, JobError> {
        match self {
            DocumentKind::PlainText => Ok(Bytes::copy_from_slice(content.as_bytes())),
            DocumentKind::Binary => STANDARD
                .decode(content.trim())
                .map(Bytes::from)
                .map_err(|e| JobError::Encoding(format!("Invalid base64 document content: {}", e))),
        }
    }

    /// Turns stored bytes back into transport text.
    pub fn encode_transport(&self, data: &[u8]) -> Result<String, JobError> {
        match self {
            DocumentKind::PlainText => String::from_utf8(data.to_vec())
                .map_err(|e| JobError::Encoding(format!("Document is not valid UTF-8: {}", e))),
            DocumentKind::Binary => Ok(STANDARD.encode(data)),
        }
    }
}
