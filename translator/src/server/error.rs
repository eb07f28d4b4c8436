use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::{error, warn};

use super::types::ErrorResponse;
use crate::error::job::JobError;
use crate::error::ErrorKind;

pub type ApiServiceResult<T> = Result<T, ApiServiceError>;

/// Errors surfaced by the translation routes.
///
/// Each one maps to a status code and public message through [`ErrorKind`].
/// The error text travels in the `details` field.
#[derive(Debug, thiserror::Error)]
pub enum ApiServiceError {
    #[error(transparent)]
    Job(#[from] JobError),

    /// The path segment is not a job id, so no job can have it
    #[error("Translation {0} not found")]
    InvalidId(String),

    #[error("Invalid JSON in request body: {0}")]
    InvalidBody(String),
}

impl ApiServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiServiceError::Job(e) => e.kind(),
            ApiServiceError::InvalidId(_) => ErrorKind::NotFound,
            ApiServiceError::InvalidBody(_) => ErrorKind::Validation,
        }
    }
}

impl IntoResponse for ApiServiceError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let status = kind.status_code();
        if status.is_server_error() {
            error!(error = %self, kind = %kind, "Request failed");
        } else {
            warn!(error = %self, kind = %kind, "Request rejected");
        }

        let body = ErrorResponse { error: kind.public_message().to_string(), details: Some(self.to_string()) };
        (status, Json(body)).into_response()
    }
}
