use thiserror::Error;
use uuid::Uuid;

use crate::core::client::database::DatabaseError;
use crate::core::client::queue::QueueError;
use crate::core::client::storage::StorageError;
use crate::core::client::translation::TranslationError;
use crate::error::kind::ErrorKind;
use crate::types::jobs::types::JobStatus;

/// Errors raised while driving a translation job through its lifecycle
#[derive(Error, Debug)]
pub enum JobError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Malformed transport encoding: {0}")]
    Encoding(String),

    #[error("Caller identity could not be established")]
    Unauthorized,

    #[error("Job {0} belongs to another principal")]
    Forbidden(Uuid),

    #[error("Job {0} not found")]
    NotFound(Uuid),

    #[error("Failed to write object: {0}")]
    StorageWrite(#[source] StorageError),

    #[error("Failed to read object: {0}")]
    StorageRead(#[source] StorageError),

    #[error("Ledger error: {0}")]
    Ledger(#[from] DatabaseError),

    #[error("Dispatch error: {0}")]
    Dispatch(#[from] QueueError),

    #[error("Translation provider error: {0}")]
    TranslationProvider(#[from] TranslationError),

    #[error("Illegal transition of job {id} from {from} to {to}")]
    InvalidTransition { id: Uuid, from: JobStatus, to: JobStatus },

    #[error("Storage key does not follow input/{{owner_id}}/{{job_id}}/{{file_name}}: {0}")]
    MalformedStorageKey(String),

    #[error("Failed to serialize data: {0}")]
    FailedToSerializeData(#[from] serde_json::Error),

    #[error("{0}")]
    Other(String),
}

impl JobError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            JobError::Validation(_) => ErrorKind::Validation,
            JobError::Encoding(_) => ErrorKind::Encoding,
            JobError::Unauthorized => ErrorKind::Unauthorized,
            JobError::Forbidden(_) => ErrorKind::Forbidden,
            JobError::NotFound(_) => ErrorKind::NotFound,
            JobError::StorageWrite(_) => ErrorKind::StorageWrite,
            JobError::StorageRead(_) => ErrorKind::StorageRead,
            JobError::Ledger(_) => ErrorKind::Ledger,
            JobError::Dispatch(_) => ErrorKind::Dispatch,
            JobError::TranslationProvider(_) => ErrorKind::TranslationProvider,
            JobError::InvalidTransition { .. }
            | JobError::MalformedStorageKey(_)
            | JobError::FailedToSerializeData(_)
            | JobError::Other(_) => ErrorKind::Internal,
        }
    }
}
