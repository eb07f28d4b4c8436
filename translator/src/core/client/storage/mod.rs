pub mod error;
pub mod s3;

use async_trait::async_trait;
use bytes::Bytes;
pub use error::StorageError;
use std::time::Duration;

/// The two buckets a job's documents live in
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum StorageBucket {
    #[strum(serialize = "input")]
    Input,
    #[strum(serialize = "output")]
    Output,
}

/// Trait defining object storage operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Read an object fully into memory
    async fn get_data(&self, bucket: StorageBucket, key: &str) -> Result<Bytes, StorageError>;

    /// Write an object with server-side encryption at rest
    async fn put_data(
        &self,
        bucket: StorageBucket,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError>;

    /// Time-limited read URL for an object
    async fn presigned_get_url(&self, bucket: StorageBucket, key: &str, ttl: Duration) -> Result<String, StorageError>;

    /// Perform a health check on the storage service
    ///
    /// # Returns
    /// * `Ok(())` - If both buckets are reachable
    /// * `Err(StorageError)` - If the health check fails
    async fn health_check(&self) -> Result<(), StorageError>;
}
