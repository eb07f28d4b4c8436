pub mod consumer;
pub mod event;
pub mod job;
pub mod kind;

use thiserror::Error;

use crate::core::client::database::DatabaseError;
use crate::core::client::queue::QueueError;
use crate::core::client::storage::StorageError;
use crate::core::client::translation::TranslationError;
use crate::core::error::TranslatorCoreError;
pub use consumer::ConsumptionError;
pub use kind::ErrorKind;

/// Result type for translator operations
pub type TranslatorResult<T> = Result<T, TranslatorError>;

/// Process-level errors of the translator
#[derive(Error, Debug)]
pub enum TranslatorError {
    #[error("Storage error: {0}")]
    StorageError(#[from] StorageError),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),

    #[error("Database error: {0}")]
    DatabaseError(#[from] DatabaseError),

    #[error("Translation provider error: {0}")]
    TranslationError(#[from] TranslationError),

    #[error("Translator Core Error: {0}")]
    TranslatorCoreError(#[from] TranslatorCoreError),

    #[error("Event System Error: {0}")]
    EventSystemError(#[from] event::EventSystemError),

    /// Run Command error
    #[error("Run Command Error: {0}")]
    RunCommandError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Database error
    #[error("Database Invalid URI error: {0}")]
    DatabaseInvalidURIError(String),

    /// Resource Setup error
    #[error("Resource setup error: {0}")]
    ResourceSetupError(String),

    /// Server error
    #[error("Server error: {0}")]
    ServerError(String),
}
