use chrono::{DateTime, SubsecRound, Utc};
use mongodb::bson::serde_helpers::{chrono_datetime_as_bson_datetime, uuid_1_as_binary};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::jobs::requests::{ValidatedCreateJob, WorkerInvocation};
use crate::types::jobs::serde_helpers::optional_chrono_as_bson_datetime;
use crate::types::jobs::storage_path::StoragePath;
use crate::types::jobs::types::JobStatus;

/// A translation request from submission to its terminal outcome, as recorded in the ledger.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TranslationJob {
    /// Assigned once at creation
    #[serde(with = "uuid_1_as_binary")]
    pub id: Uuid,
    /// The principal that submitted the job; the only one allowed to read it
    pub owner_id: String,
    pub file_name: String,
    pub source_language: String,
    pub target_language: String,
    /// Content type the input object was stored with
    pub content_type: String,
    pub status: JobStatus,
    pub input_location: String,
    /// Set only once the job is completed
    #[serde(default)]
    pub output_location: Option<String>,
    /// The submitted content in its transport form (base64 for binary documents)
    pub original_content: String,
    /// Set only once the job is completed
    #[serde(default)]
    pub translated_content: Option<String>,
    /// helps to keep track of the version of the item for optimistic locking
    pub version: i32,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
    #[serde(default, with = "optional_chrono_as_bson_datetime")]
    pub completed_at: Option<DateTime<Utc>>,
    /// After this instant the record may be purged by an external sweep
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub expires_at: DateTime<Utc>,
}

impl TranslationJob {
    /// Builds the pending record for a validated request.
    pub fn new_pending(id: Uuid, request: &ValidatedCreateJob, retention: chrono::Duration) -> Self {
        let now = Utc::now().round_subsecs(0);
        let path = StoragePath::new(&request.owner_id, id, &request.file_name);
        Self {
            id,
            owner_id: request.owner_id.clone(),
            file_name: request.file_name.clone(),
            source_language: request.source_language.clone(),
            target_language: request.target_language.clone(),
            content_type: request.kind.content_type().to_string(),
            status: JobStatus::Pending,
            input_location: path.input_key(),
            output_location: None,
            original_content: request.content.clone(),
            translated_content: None,
            version: 0,
            created_at: now,
            updated_at: now,
            completed_at: None,
            expires_at: now + retention,
        }
    }

    pub fn is_owned_by(&self, owner_id: &str) -> bool {
        self.owner_id == owner_id
    }

    pub fn storage_path(&self) -> StoragePath {
        StoragePath::new(&self.owner_id, self.id, &self.file_name)
    }

    /// The worker payload for this job carrying `content` in transport form.
    pub fn to_invocation(&self, content: String) -> WorkerInvocation {
        WorkerInvocation {
            job_id: self.id,
            content,
            source_language: self.source_language.clone(),
            target_language: self.target_language.clone(),
            file_name: self.file_name.clone(),
            owner_id: self.owner_id.clone(),
            content_type: Some(self.content_type.clone()),
        }
    }
}

/// A job as returned to its owner, with a signed download reference when completed.
#[derive(Debug, Clone, PartialEq)]
pub struct JobView {
    pub job: TranslationJob,
    /// `None` unless the job is completed and a reference could be signed
    pub download_url: Option<String>,
}
