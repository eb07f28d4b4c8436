use super::error::DatabaseError;
use crate::core::client::database::constant::JOBS_COLLECTION;
use crate::core::client::database::DatabaseClient;
use crate::types::jobs::job_item::TranslationJob;
use crate::types::jobs::job_updates::JobItemUpdates;
use crate::types::params::database::DatabaseArgs;
use crate::utils::metrics::TRANSLATOR_METRICS;
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use futures::TryStreamExt;
use mongodb::bson::{doc, Bson, Document};
use mongodb::options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument, UpdateOptions};
use mongodb::{bson, Client, Collection, Database, IndexModel};
use opentelemetry::KeyValue;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, warn};
use uuid::Uuid;

pub trait ToDocument {
    fn to_document(&self) -> Result<Document, DatabaseError>;
}

impl<T: Serialize> ToDocument for T {
    fn to_document(&self) -> Result<Document, DatabaseError> {
        let doc = bson::to_bson(self)?;

        if let Bson::Document(doc) = doc {
            Ok(doc)
        } else {
            Err(DatabaseError::FailedToSerializeDocument(format!("Failed to serialize document: {}", doc)))
        }
    }
}

/// Converts an update into the `$set` fields it touches; absent fields are left alone.
fn updates_to_document(update: &JobItemUpdates) -> Result<Document, DatabaseError> {
    let mut document = Document::new();
    if let Some(status) = &update.status {
        document.insert("status", bson::to_bson(status)?);
    }
    if let Some(translated_content) = &update.translated_content {
        document.insert("translated_content", translated_content.clone());
    }
    if let Some(output_location) = &update.output_location {
        document.insert("output_location", output_location.clone());
    }
    if let Some(completed_at) = update.completed_at {
        document.insert("completed_at", Bson::DateTime(bson::DateTime::from_chrono(completed_at)));
    }
    Ok(document)
}

/// MongoDB client implementation
pub struct MongoDbClient {
    database: Arc<Database>,
}

impl MongoDbClient {
    pub async fn new(config: &DatabaseArgs) -> Result<Self, DatabaseError> {
        let client = Client::with_uri_str(&config.connection_uri).await?;
        let database = Arc::new(client.database(&config.database_name));
        Ok(Self { database })
    }

    fn get_job_collection(&self) -> Collection<TranslationJob> {
        self.database.collection(JOBS_COLLECTION)
    }

    /// Indexes backing id lookups, per-owner listing and the retention sweep.
    pub async fn create_indexes(&self) -> Result<(), DatabaseError> {
        let indexes = vec![
            IndexModel::builder()
                .keys(doc! { "id": 1 })
                .options(IndexOptions::builder().unique(true).build())
                .build(),
            IndexModel::builder().keys(doc! { "owner_id": 1, "created_at": -1 }).build(),
            IndexModel::builder().keys(doc! { "expires_at": 1 }).build(),
        ];
        self.get_job_collection().create_indexes(indexes, None).await?;
        debug!(collection = JOBS_COLLECTION, "Ledger indexes created");
        Ok(())
    }

    fn record_call(operation: &'static str, start: Instant) {
        let attributes = [KeyValue::new("db_operation_name", operation)];
        TRANSLATOR_METRICS.db_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
    }
}

#[async_trait]
impl DatabaseClient for MongoDbClient {
    async fn create_job(&self, job: TranslationJob) -> Result<TranslationJob, DatabaseError> {
        let start = Instant::now();
        let options = UpdateOptions::builder().upsert(true).build();

        let filter = doc! { "id": job.id };
        let updates = doc! {
            // only set when the document is inserted for the first time
            "$setOnInsert": job.to_document()?
        };

        let result = self.get_job_collection().update_one(filter, updates, options).await?;

        if result.matched_count == 0 {
            debug!(job_id = %job.id, duration = %start.elapsed().as_millis(), "Job created in MongoDB successfully");
            Self::record_call("create_job", start);
            Ok(job)
        } else {
            Err(DatabaseError::ItemAlreadyExists(format!("Job already exists for id {}", job.id)))
        }
    }

    async fn get_job_by_id(&self, id: Uuid) -> Result<Option<TranslationJob>, DatabaseError> {
        let start = Instant::now();
        let filter = doc! { "id": id };
        debug!(job_id = %id, "Fetching job by id");
        let job = self.get_job_collection().find_one(filter, None).await?;
        Self::record_call("get_job_by_id", start);
        Ok(job)
    }

    async fn update_job(
        &self,
        current_job: &TranslationJob,
        update: JobItemUpdates,
    ) -> Result<TranslationJob, DatabaseError> {
        let start = Instant::now();
        // Filters to search for the job
        let filter = doc! {
            "id": current_job.id,
            "version": current_job.version,
        };
        let options = FindOneAndUpdateOptions::builder().upsert(false).return_document(ReturnDocument::After).build();

        let mut non_null_updates = updates_to_document(&update)?;

        // throw an error if there's no field to be updated
        if non_null_updates.is_empty() {
            return Err(DatabaseError::NoUpdateFound("No field to be updated, likely a false call".to_string()));
        }

        // Add additional fields that are always updated
        non_null_updates.insert("version", Bson::Int32(current_job.version + 1));
        non_null_updates.insert("updated_at", Bson::DateTime(Utc::now().round_subsecs(0).into()));

        let update = doc! {
            "$set": non_null_updates
        };

        let result = self.get_job_collection().find_one_and_update(filter, update, options).await?;
        match result {
            Some(job) => {
                debug!(job_id = %job.id, status = %job.status, "Job updated successfully");
                Self::record_call("update_job", start);
                Ok(job)
            }
            None => {
                warn!(job_id = %current_job.id, version = %current_job.version, "Failed to update job. Job version is likely outdated");
                Err(DatabaseError::UpdateFailed(format!("Failed to update job. Identifier - {}", current_job.id)))
            }
        }
    }

    async fn list_jobs_by_owner(&self, owner_id: &str) -> Result<Vec<TranslationJob>, DatabaseError> {
        let start = Instant::now();
        let filter = doc! { "owner_id": owner_id };
        let options = FindOptions::builder().sort(doc! { "created_at": -1 }).build();

        let jobs: Vec<TranslationJob> = self.get_job_collection().find(filter, options).await?.try_collect().await?;
        debug!(owner_id, count = jobs.len(), "Fetched jobs for owner");
        Self::record_call("list_jobs_by_owner", start);
        Ok(jobs)
    }

    async fn health_check(&self) -> Result<(), DatabaseError> {
        self.database.run_command(doc! { "ping": 1 }, None).await?;
        Ok(())
    }
}
