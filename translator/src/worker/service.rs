use std::sync::Arc;

use uuid::Uuid;

use crate::core::client::storage::StorageBucket;
use crate::core::config::Config;
use crate::error::job::JobError;
use crate::types::jobs::job_item::{JobView, TranslationJob};
use crate::types::jobs::requests::CreateJobRequest;
use crate::types::jobs::types::JobStatus;
use crate::types::queue::QueueType;
use crate::utils::metrics::TRANSLATOR_METRICS;

/// Owner-facing job operations: creation, dispatch and reads.
pub struct JobService;

impl JobService {
    /// Retrieves a job by its ID from the database
    ///
    /// # Returns
    /// * `Result<TranslationJob, JobError>` - The job if found, or NotFound error
    pub(crate) async fn get_job(id: Uuid, config: Arc<Config>) -> Result<TranslationJob, JobError> {
        config.database().get_job_by_id(id).await?.ok_or(JobError::NotFound(id))
    }

    /// Creates a translation job from a submission.
    ///
    /// The document is stored before the record is written, so a storage failure leaves
    /// nothing behind in the ledger. Dispatch happens last and its failure does not fail
    /// the call: the job stays `pending` and is returned.
    ///
    /// # Errors
    /// * `Unauthorized` / `Validation` - the submission is incomplete or unsupported
    /// * `Encoding` - binary content is not valid base64
    /// * `StorageWrite` / `Ledger` - a collaborator failed before the job was recorded
    pub async fn create_job(request: CreateJobRequest, config: Arc<Config>) -> Result<TranslationJob, JobError> {
        let request = request.validate()?;
        let data = request.kind.decode_transport(&request.content)?;

        let job = TranslationJob::new_pending(Uuid::new_v4(), &request, config.service_config().retention);
        tracing::debug!(job_id = %job.id, key = %job.input_location, size = data.len(), "Storing submitted document");

        config
            .storage()
            .put_data(StorageBucket::Input, &job.input_location, data, request.kind.content_type())
            .await
            .map_err(JobError::StorageWrite)?;

        let job = config.database().create_job(job).await?;
        TRANSLATOR_METRICS.jobs_created.add(1, &[]);
        tracing::info!(job_id = %job.id, owner_id = %job.owner_id, "Translation job created");

        if let Err(e) = Self::dispatch(&job, config.clone()).await {
            TRANSLATOR_METRICS.dispatch_failures.add(1, &[]);
            tracing::error!(job_id = %job.id, error = %e, "Dispatch failed, job stays pending");
        }

        Ok(job)
    }

    /// Sends the worker invocation for `job` carrying its submitted content.
    pub async fn dispatch(job: &TranslationJob, config: Arc<Config>) -> Result<(), JobError> {
        Self::dispatch_content(job, job.original_content.clone(), config).await
    }

    /// Sends a worker invocation for `job` carrying `content` in transport form.
    /// Fire-and-forget: delivery is at-least-once and nothing waits for the worker.
    pub async fn dispatch_content(job: &TranslationJob, content: String, config: Arc<Config>) -> Result<(), JobError> {
        let queue = QueueType::TranslationJobProcessing;
        let payload = serde_json::to_string(&job.to_invocation(content))?;

        config.queue().send_message(queue.clone(), payload, None).await.inspect_err(|e| {
            tracing::error!(queue = %queue, job_id = %job.id, error = ?e, "Failed to send worker invocation");
        })?;

        tracing::info!(queue = %queue, job_id = %job.id, "Worker invocation sent");
        Ok(())
    }

    /// All jobs of `owner_id`, newest first, each with its download reference.
    pub async fn list_jobs(owner_id: &str, config: Arc<Config>) -> Result<Vec<JobView>, JobError> {
        let jobs = config.database().list_jobs_by_owner(owner_id).await?;
        let mut views = Vec::with_capacity(jobs.len());
        for job in jobs {
            if !job.is_owned_by(owner_id) {
                continue;
            }
            let download_url = Self::download_url(&job, &config).await;
            views.push(JobView { job, download_url });
        }
        Ok(views)
    }

    /// A single job, readable only by its owner.
    ///
    /// # Errors
    /// * `NotFound` - no job has this id
    /// * `Forbidden` - the job belongs to another principal
    pub async fn get_owned_job(id: Uuid, owner_id: &str, config: Arc<Config>) -> Result<JobView, JobError> {
        let job = Self::get_job(id, config.clone()).await?;
        if !job.is_owned_by(owner_id) {
            tracing::warn!(job_id = %id, "Job requested by a principal that does not own it");
            return Err(JobError::Forbidden(id));
        }
        let download_url = Self::download_url(&job, &config).await;
        Ok(JobView { job, download_url })
    }

    /// Signs a read reference to the output of a completed job. Failures degrade to `None`.
    async fn download_url(job: &TranslationJob, config: &Config) -> Option<String> {
        if job.status != JobStatus::Completed {
            return None;
        }
        let output_location = job.output_location.as_deref()?;
        let ttl = config.service_config().download_url_ttl;
        match config.storage().presigned_get_url(StorageBucket::Output, output_location, ttl).await {
            Ok(url) => Some(url),
            Err(e) => {
                tracing::warn!(job_id = %job.id, error = %e, "Failed to sign download reference");
                None
            }
        }
    }
}
