pub mod error;
pub mod sqs;

use crate::types::queue::QueueType;
use async_trait::async_trait;
pub use error::QueueError;
use omniqueue::Delivery;
use std::time::Duration;

/// Trait defining queue operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait QueueClient: Send + Sync {
    async fn send_message(&self, queue: QueueType, payload: String, delay: Option<Duration>) -> Result<(), QueueError>;

    /// Returns `QueueError::ErrorFromQueueError(omniqueue::QueueError::NoData)` when the queue is empty.
    async fn consume_message_from_queue(&self, queue: QueueType) -> Result<Delivery, QueueError>;

    /// Perform a health check on the queue service
    ///
    /// # Returns
    /// * `Ok(())` - If every queue can be resolved
    /// * `Err(QueueError)` - If the health check fails
    async fn health_check(&self) -> Result<(), QueueError>;
}
