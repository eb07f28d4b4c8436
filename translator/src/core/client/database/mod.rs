pub mod constant;
pub mod error;
pub mod mongodb;

use crate::types::jobs::job_item::TranslationJob;
use crate::types::jobs::job_updates::JobItemUpdates;
use async_trait::async_trait;
pub use error::DatabaseError;

/// Trait defining the job ledger operations
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatabaseClient: Send + Sync {
    /// create_job - Record a new job; fails with `ItemAlreadyExists` if the id is taken
    async fn create_job(&self, job: TranslationJob) -> Result<TranslationJob, DatabaseError>;
    /// get_job_by_id - Get a job by its ID
    async fn get_job_by_id(&self, id: uuid::Uuid) -> Result<Option<TranslationJob>, DatabaseError>;
    /// update_job - Apply `update` only if the stored version still equals `current_job.version`.
    /// Returns the stored record after the update, or `UpdateFailed` when the version moved.
    async fn update_job(
        &self,
        current_job: &TranslationJob,
        update: JobItemUpdates,
    ) -> Result<TranslationJob, DatabaseError>;
    /// list_jobs_by_owner - All jobs of one principal, newest first
    async fn list_jobs_by_owner(&self, owner_id: &str) -> Result<Vec<TranslationJob>, DatabaseError>;
    /// health_check - Ping the database
    async fn health_check(&self) -> Result<(), DatabaseError>;
}
