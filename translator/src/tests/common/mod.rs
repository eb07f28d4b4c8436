
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{SubsecRound, Utc};
use omniqueue::Delivery;
use rstest::*;
use uuid::Uuid;

use crate::core::client::database::{DatabaseClient, DatabaseError};
use crate::core::client::queue::{QueueClient, QueueError};
use crate::core::client::storage::{StorageBucket, StorageClient, StorageError};
use crate::core::client::translation::{TranslationClient, TranslationError};
use crate::tests::common::constants::{OWNER_ID, SIGNED_URL_HOST};
use crate::types::jobs::document::DocumentKind;
use crate::types::jobs::job_item::TranslationJob;
use crate::types::jobs::job_updates::JobItemUpdates;
use crate::types::jobs::requests::{CreateJobRequest, ValidatedCreateJob};
use crate::types::jobs::types::JobStatus;
use crate::types::queue::QueueType;

#[fixture]
pub fn create_request() -> CreateJobRequest {
    CreateJobRequest {
        owner_id: Some(OWNER_ID.to_string()),
        file_name: Some("a.txt".to_string()),
        source_language: Some("en".to_string()),
        target_language: Some("es".to_string()),
        content: Some("Hello world".to_string()),
        content_type: None,
    }
}

#[fixture]
pub fn pending_job(#[default(OWNER_ID)] owner_id: &str, #[default("Hello world")] content: &str) -> TranslationJob {
    let request = ValidatedCreateJob {
        owner_id: owner_id.to_string(),
        file_name: "a.txt".to_string(),
        source_language: "en".to_string(),
        target_language: "es".to_string(),
        content: content.to_string(),
        kind: DocumentKind::PlainText,
    };
    TranslationJob::new_pending(Uuid::new_v4(), &request, chrono::Duration::days(30))
}

/// Job ledger kept in memory with the same compare-and-set semantics as the MongoDB client.
#[derive(Clone, Default)]
pub struct InMemoryDatabase {
    jobs: Arc<Mutex<HashMap<Uuid, TranslationJob>>>,
    writes: Arc<Mutex<usize>>,
    /// Runs against the stored record right before the next update is checked
    interleave: Arc<Mutex<Option<Box<dyn FnOnce(&mut TranslationJob) + Send>>>>,
    fail_creates: Arc<Mutex<bool>>,
}

impl InMemoryDatabase {
    pub fn insert(&self, job: TranslationJob) {
        self.jobs.lock().unwrap().insert(job.id, job);
    }

    pub fn get(&self, id: Uuid) -> Option<TranslationJob> {
        self.jobs.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.jobs.lock().unwrap().len()
    }

    /// Number of successful creates and updates
    pub fn writes(&self) -> usize {
        *self.writes.lock().unwrap()
    }

    /// Simulates another writer touching the record between our read and our write.
    pub fn interleave_next_update(&self, change: impl FnOnce(&mut TranslationJob) + Send + 'static) {
        *self.interleave.lock().unwrap() = Some(Box::new(change));
    }

    pub fn fail_creates(&self) {
        *self.fail_creates.lock().unwrap() = true;
    }
}

/// Bumps the version like any concurrent writer would.
pub fn concurrent_write(job: &mut TranslationJob, status: JobStatus) {
    job.status = status;
    job.version += 1;
    job.updated_at = Utc::now().round_subsecs(0);
}

#[async_trait]
impl DatabaseClient for InMemoryDatabase {
    async fn create_job(&self, job: TranslationJob) -> Result<TranslationJob, DatabaseError> {
        if *self.fail_creates.lock().unwrap() {
            return Err(DatabaseError::FailedToSerializeDocument("ledger unavailable".to_string()));
        }
        let mut jobs = self.jobs.lock().unwrap();
        if jobs.contains_key(&job.id) {
            return Err(DatabaseError::ItemAlreadyExists(format!("Job already exists for id {}", job.id)));
        }
        jobs.insert(job.id, job.clone());
        *self.writes.lock().unwrap() += 1;
        Ok(job)
    }

    async fn get_job_by_id(&self, id: Uuid) -> Result<Option<TranslationJob>, DatabaseError> {
        Ok(self.get(id))
    }

    async fn update_job(
        &self,
        current_job: &TranslationJob,
        update: JobItemUpdates,
    ) -> Result<TranslationJob, DatabaseError> {
        let mut jobs = self.jobs.lock().unwrap();
        let stored = jobs
            .get_mut(&current_job.id)
            .ok_or_else(|| DatabaseError::UpdateFailed(format!("Failed to update job. Identifier - {}", current_job.id)))?;

        if let Some(change) = self.interleave.lock().unwrap().take() {
            change(stored);
        }
        if stored.version != current_job.version {
            return Err(DatabaseError::UpdateFailed(format!("Failed to update job. Identifier - {}", current_job.id)));
        }

        if let Some(status) = update.status {
            stored.status = status;
        }
        if let Some(translated_content) = update.translated_content {
            stored.translated_content = Some(translated_content);
        }
        if let Some(output_location) = update.output_location {
            stored.output_location = Some(output_location);
        }
        if let Some(completed_at) = update.completed_at {
            stored.completed_at = Some(completed_at.round_subsecs(0));
        }
        stored.version += 1;
        stored.updated_at = Utc::now().round_subsecs(0);
        *self.writes.lock().unwrap() += 1;
        Ok(stored.clone())
    }

    async fn list_jobs_by_owner(&self, owner_id: &str) -> Result<Vec<TranslationJob>, DatabaseError> {
        let mut jobs: Vec<TranslationJob> =
            self.jobs.lock().unwrap().values().filter(|job| job.owner_id == owner_id).cloned().collect();
        jobs.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(jobs)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        Ok(())
    }
}

/// Object store kept in memory. Signed references embed the key so tests can check them.
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    objects: Arc<Mutex<HashMap<(String, String), (Bytes, String)>>>,
    fail_puts: Arc<Mutex<bool>>,
    fail_signing: Arc<Mutex<bool>>,
}

impl InMemoryStorage {
    pub fn object(&self, bucket: StorageBucket, key: &str) -> Option<Bytes> {
        self.objects.lock().unwrap().get(&(bucket.to_string(), key.to_string())).map(|(data, _)| data.clone())
    }

    pub fn content_type(&self, bucket: StorageBucket, key: &str) -> Option<String> {
        self.objects.lock().unwrap().get(&(bucket.to_string(), key.to_string())).map(|(_, ct)| ct.clone())
    }

    pub fn len(&self) -> usize {
        self.objects.lock().unwrap().len()
    }

    pub fn insert(&self, bucket: StorageBucket, key: &str, data: impl Into<Bytes>, content_type: &str) {
        self.objects
            .lock()
            .unwrap()
            .insert((bucket.to_string(), key.to_string()), (data.into(), content_type.to_string()));
    }

    pub fn fail_puts(&self) {
        *self.fail_puts.lock().unwrap() = true;
    }

    pub fn fail_signing(&self) {
        *self.fail_signing.lock().unwrap() = true;
    }
}

#[async_trait]
impl StorageClient for InMemoryStorage {
    async fn get_data(&self, bucket: StorageBucket, key: &str) -> Result<Bytes, StorageError> {
        self.object(bucket, key).ok_or_else(|| StorageError::Other(format!("No object {} in {}", key, bucket)))
    }

    async fn put_data(
        &self,
        bucket: StorageBucket,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        if *self.fail_puts.lock().unwrap() {
            return Err(StorageError::Other("object store unavailable".to_string()));
        }
        self.insert(bucket, key, data, content_type);
        Ok(())
    }

    async fn presigned_get_url(&self, bucket: StorageBucket, key: &str, ttl: Duration) -> Result<String, StorageError> {
        if *self.fail_signing.lock().unwrap() {
            return Err(StorageError::Other("signing unavailable".to_string()));
        }
        Ok(format!("https://{}/{}/{}?expires={}", SIGNED_URL_HOST, bucket, key, ttl.as_secs()))
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        Ok(())
    }
}

/// Queue that records what is sent and never has anything to consume.
#[derive(Clone, Default)]
pub struct RecordingQueue {
    sent: Arc<Mutex<Vec<(QueueType, String)>>>,
    fail_sends: Arc<Mutex<bool>>,
}

impl RecordingQueue {
    pub fn sent(&self) -> Vec<(QueueType, String)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn fail_sends(&self) {
        *self.fail_sends.lock().unwrap() = true;
    }
}

#[async_trait]
impl QueueClient for RecordingQueue {
    async fn send_message(&self, queue: QueueType, payload: String, _delay: Option<Duration>) -> Result<(), QueueError> {
        if *self.fail_sends.lock().unwrap() {
            return Err(QueueError::FailedToGetQueueUrl(queue.to_string()));
        }
        self.sent.lock().unwrap().push((queue, payload));
        Ok(())
    }

    async fn consume_message_from_queue(&self, _queue: QueueType) -> Result<Delivery, QueueError> {
        Err(QueueError::ErrorFromQueueError(omniqueue::QueueError::NoData))
    }

    async fn health_check(&self) -> Result<(), QueueError> {
        Ok(())
    }
}

/// Deterministic translation: every chunk comes back as `[{target}]{chunk}`.
#[derive(Clone, Default)]
pub struct EchoTranslator {
    calls: Arc<Mutex<Vec<String>>>,
    fail: Arc<Mutex<bool>>,
}

impl EchoTranslator {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn fail(&self) {
        *self.fail.lock().unwrap() = true;
    }
}

#[async_trait]
impl TranslationClient for EchoTranslator {
    async fn translate(
        &self,
        text: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<String, TranslationError> {
        if *self.fail.lock().unwrap() {
            return Err(TranslationError::Other("provider throttled".to_string()));
        }
        self.calls.lock().unwrap().push(text.to_string());
        Ok(format!("[{}]{}", target_language, text))
    }
}
