use super::client::{
    database::DatabaseError, queue::QueueError, storage::StorageError, translation::TranslationError,
};
use thiserror::Error;

pub type TranslatorCoreResult<T> = Result<T, TranslatorCoreError>;

#[derive(Error, Debug)]
pub enum TranslatorCoreError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Translation provider error: {0}")]
    TranslationError(#[from] TranslationError),

    #[error("Invalid provider: {0}")]
    InvalidProvider(String),
}
