use http::StatusCode;

/// Classification of every failure the lifecycle can produce.
///
/// The kind is decided where the failure happens; the HTTP adapter only
/// looks it up here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
pub enum ErrorKind {
    Validation,
    Encoding,
    Unauthorized,
    Forbidden,
    NotFound,
    StorageWrite,
    StorageRead,
    Ledger,
    Dispatch,
    TranslationProvider,
    Internal,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::Validation | ErrorKind::Encoding => StatusCode::BAD_REQUEST,
            ErrorKind::Unauthorized => StatusCode::UNAUTHORIZED,
            ErrorKind::Forbidden => StatusCode::FORBIDDEN,
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::StorageWrite
            | ErrorKind::StorageRead
            | ErrorKind::Ledger
            | ErrorKind::Dispatch
            | ErrorKind::TranslationProvider
            | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message returned to clients; diagnostics stay in the logs and the `details` field.
    pub fn public_message(&self) -> &'static str {
        match self {
            ErrorKind::Validation => "Invalid request",
            ErrorKind::Encoding => "Invalid document encoding",
            ErrorKind::Unauthorized => "Unauthorized",
            ErrorKind::Forbidden => "Access denied",
            ErrorKind::NotFound => "Translation not found",
            ErrorKind::StorageWrite => "File upload failed",
            ErrorKind::StorageRead => "File download failed",
            ErrorKind::Ledger => "Database operation failed",
            ErrorKind::Dispatch => "Failed to dispatch translation",
            ErrorKind::TranslationProvider => "Translation failed",
            ErrorKind::Internal => "Internal server error",
        }
    }
}
