use std::sync::Arc;
use std::time::Instant;

use bytes::Bytes;
use tracing::{debug, error, info, warn, Span};
use uuid::Uuid;

use crate::core::client::database::DatabaseError;
use crate::core::client::storage::StorageBucket;
use crate::core::config::Config;
use crate::error::job::JobError;
use crate::types::constant::{MAX_TRANSITION_ATTEMPTS, TEXT_CONTENT_TYPE};
use crate::types::jobs::document::DocumentKind;
use crate::types::jobs::job_item::TranslationJob;
use crate::types::jobs::job_updates::JobItemUpdates;
use crate::types::jobs::requests::{StorageEvent, WorkerInvocation};
use crate::types::jobs::storage_path::StoragePath;
use crate::types::jobs::types::JobStatus;
use crate::utils::metrics::TRANSLATOR_METRICS;
use crate::worker::event_handler::translation::{record_translation_time, translate_text};
use crate::worker::service::JobService;

/// Drives jobs through `pending → processing → completed | failed`.
///
/// Every entry point tolerates duplicate and concurrent delivery: writes are
/// compare-and-set on the record version, and a conflicting write is resolved by
/// reloading the record and re-evaluating the transition against it.
pub struct JobHandlerService;

impl JobHandlerService {
    /// Worker pipeline entry point.
    ///
    /// # State Transitions
    /// * `pending | processing` -> `processing` -> `completed`
    /// * any failure after the job was loaded -> `failed`, then the error is returned
    /// * `completed | failed` -> unchanged (duplicate delivery)
    pub async fn process_invocation(invocation: WorkerInvocation, config: Arc<Config>) -> Result<(), JobError> {
        let start = Instant::now();
        let job = JobService::get_job(invocation.job_id, config.clone()).await?;

        if job.status.is_terminal() {
            info!(job_id = %job.id, status = %job.status, "Job already finished, ignoring duplicate invocation");
            return Ok(());
        }
        if invocation.owner_id != job.owner_id {
            warn!(job_id = %job.id, "Invocation owner differs from the recorded owner, using the recorded one");
        }

        let job = match Self::transition(job, JobItemUpdates::new().update_status(JobStatus::Processing), &config).await
        {
            Ok(job) => job,
            Err(e) => {
                Self::mark_failed(invocation.job_id, &e.to_string(), &config).await;
                return Err(e);
            }
        };
        if job.status.is_terminal() {
            info!(job_id = %job.id, status = %job.status, "Job finished concurrently, nothing left to do");
            return Ok(());
        }
        Span::current().record("status", job.status.to_string().as_str());

        match Self::translate_and_complete(&job, &invocation, &config).await {
            Ok(job) => {
                record_translation_time(start);
                info!(job_id = %job.id, status = %job.status, "Translation job finished");
                Ok(())
            }
            Err(e) => {
                error!(job_id = %job.id, error = %e, "Translation job failed");
                Self::mark_failed(job.id, &e.to_string(), &config).await;
                Err(e)
            }
        }
    }

    async fn translate_and_complete(
        job: &TranslationJob,
        invocation: &WorkerInvocation,
        config: &Arc<Config>,
    ) -> Result<TranslationJob, JobError> {
        let translated = Self::translate_document(invocation, config).await?;

        let output_location = job.storage_path().output_key();
        config
            .storage()
            .put_data(StorageBucket::Output, &output_location, Bytes::from(translated.clone()), TEXT_CONTENT_TYPE)
            .await
            .map_err(JobError::StorageWrite)?;
        debug!(job_id = %job.id, key = %output_location, "Translated document stored");

        let completed =
            Self::transition(job.clone(), JobItemUpdates::new().complete(translated, output_location), config).await?;
        if completed.status == JobStatus::Completed {
            TRANSLATOR_METRICS.jobs_completed.add(1, &[]);
        }
        Ok(completed)
    }

    async fn translate_document(invocation: &WorkerInvocation, config: &Arc<Config>) -> Result<String, JobError> {
        let kind = invocation.document_kind();
        debug!(job_id = %invocation.job_id, ?kind, "Translating document");
        match kind {
            DocumentKind::Binary => {
                let data = kind.decode_transport(&invocation.content)?;
                config
                    .binary_translator()
                    .translate(&data, &invocation.source_language, &invocation.target_language)
                    .await
            }
            DocumentKind::PlainText => Ok(translate_text(
                config.translation(),
                &invocation.content,
                &invocation.source_language,
                &invocation.target_language,
                config.service_config().chunk_size,
            )
            .await?),
        }
    }

    /// Storage-triggered ingress: an object landed under `input/` without going through the HTTP adapter.
    ///
    /// Notifications for unknown, foreign or finished jobs are dropped without error.
    /// A key that does not follow the input layout is an error and mutates nothing.
    pub async fn handle_storage_event(event: StorageEvent, config: Arc<Config>) -> Result<(), JobError> {
        if !event.is_object_created() {
            debug!(event_name = %event.event_name, "Ignoring storage event");
            return Ok(());
        }

        let key = event.decoded_key()?;
        let path = StoragePath::parse_input_key(&key)?;

        let Some(job_id) = path.job_uuid() else {
            warn!(key = %key, "Storage key does not name a recorded job, ignoring");
            return Ok(());
        };
        let Some(job) = config.database().get_job_by_id(job_id).await? else {
            warn!(job_id = %job_id, "No job recorded for stored object, ignoring");
            return Ok(());
        };
        if !job.is_owned_by(&path.owner_id) {
            warn!(job_id = %job_id, "Stored object owner differs from the job owner, ignoring");
            return Ok(());
        }
        if job.status.is_terminal() {
            info!(job_id = %job_id, status = %job.status, "Job already finished, ignoring storage event");
            return Ok(());
        }

        match Self::forward_stored_document(job, &key, &config).await {
            Ok(()) => Ok(()),
            Err(e) => {
                error!(job_id = %job_id, error = %e, "Storage-triggered ingress failed");
                Self::mark_failed(job_id, &e.to_string(), &config).await;
                Err(e)
            }
        }
    }

    /// The recorded content type decides the transport encoding, since the worker reads the
    /// same field from the invocation. The file extension is not consulted.
    async fn forward_stored_document(job: TranslationJob, key: &str, config: &Arc<Config>) -> Result<(), JobError> {
        let data = config.storage().get_data(StorageBucket::Input, key).await.map_err(JobError::StorageRead)?;
        let kind = DocumentKind::from_content_type(&job.content_type);
        let content = kind.encode_transport(&data)?;

        let job = Self::transition(job, JobItemUpdates::new().update_status(JobStatus::Processing), config).await?;
        if job.status.is_terminal() {
            return Ok(());
        }
        JobService::dispatch_content(&job, content, config.clone()).await
    }

    /// Best-effort move to `failed`. Finished jobs are left alone; errors are logged, not retried.
    pub async fn mark_failed(id: Uuid, reason: &str, config: &Arc<Config>) {
        let job = match config.database().get_job_by_id(id).await {
            Ok(Some(job)) => job,
            Ok(None) => {
                warn!(job_id = %id, "Cannot mark missing job as failed");
                return;
            }
            Err(e) => {
                error!(job_id = %id, error = %e, "Failed to load job while marking it failed");
                return;
            }
        };
        if job.status.is_terminal() {
            debug!(job_id = %id, status = %job.status, "Job already finished, not marking failed");
            return;
        }

        match Self::transition(job, JobItemUpdates::new().update_status(JobStatus::Failed), config).await {
            Ok(job) if job.status == JobStatus::Failed => {
                TRANSLATOR_METRICS.jobs_failed.add(1, &[]);
                warn!(job_id = %id, reason, "Job marked as failed");
            }
            Ok(job) => debug!(job_id = %id, status = %job.status, "Job finished concurrently, not marked failed"),
            Err(e) => error!(job_id = %id, error = %e, "Failed to mark job as failed"),
        }
    }

    /// Applies `update` if the job may move to its target status.
    ///
    /// A record that already has the target status is returned unchanged, so
    /// re-entering `processing` and duplicate completions write nothing. A finished
    /// record is returned as stored and the caller must check its status.
    async fn transition(
        mut job: TranslationJob,
        update: JobItemUpdates,
        config: &Arc<Config>,
    ) -> Result<TranslationJob, JobError> {
        let target = update.status.ok_or_else(|| JobError::Other("Transition without a target status".to_string()))?;
        let update = update.build()?;

        for attempt in 1..=MAX_TRANSITION_ATTEMPTS {
            if job.status == target || job.status.is_terminal() {
                return Ok(job);
            }
            if !job.status.can_transition_to(target) {
                return Err(JobError::InvalidTransition { id: job.id, from: job.status, to: target });
            }

            match config.database().update_job(&job, update.clone()).await {
                Ok(updated) => {
                    debug!(job_id = %job.id, from = %job.status, to = %target, "Job status updated");
                    return Ok(updated);
                }
                Err(DatabaseError::UpdateFailed(message)) => {
                    debug!(job_id = %job.id, attempt, %message, "Job changed concurrently, reloading");
                    job = JobService::get_job(job.id, config.clone()).await?;
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(JobError::Other(format!(
            "Job {} kept changing concurrently, gave up after {} attempts",
            job.id, MAX_TRANSITION_ATTEMPTS
        )))
    }
}
