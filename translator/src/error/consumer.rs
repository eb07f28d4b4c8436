use thiserror::Error;
use uuid::Uuid;

use crate::core::client::queue::QueueError;

#[derive(Error, Debug)]
pub enum ConsumptionError {
    #[error("Failed to consume message from queue, error {error_msg:?}")]
    FailedToConsumeFromQueue { error_msg: String },

    #[error("Failed to handle job with id {job_id:?}. Error: {error_msg:?}")]
    FailedToHandleJob { job_id: Uuid, error_msg: String },

    #[error("Failed to handle storage event for key {key:?}. Error: {error_msg:?}")]
    FailedToHandleStorageEvent { key: String, error_msg: String },

    #[error("Failed to acknowledge message: {0}")]
    FailedToAcknowledgeMessage(String),

    #[error("Failed to parse message: {0}")]
    MessageParsingError(String),

    #[error("Queue error: {0}")]
    QueueError(#[from] QueueError),
}
