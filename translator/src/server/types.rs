use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::jobs::job_item::JobView;
use crate::types::jobs::requests::CreateJobRequest;
use crate::types::jobs::types::JobStatus;

/// Body of `POST /translations`.
///
/// Every field is optional here so that missing ones are reported together by validation.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTranslationBody {
    pub file_name: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    pub file_content: Option<String>,
    pub file_type: Option<String>,
}

impl CreateTranslationBody {
    pub fn into_request(self, owner_id: Option<String>) -> CreateJobRequest {
        CreateJobRequest {
            owner_id,
            file_name: self.file_name,
            source_language: self.source_language,
            target_language: self.target_language,
            content: self.file_content,
            content_type: self.file_type,
        }
    }
}

/// Job record as returned to clients.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TranslationJobResponse {
    pub id: Uuid,
    pub user_id: String,
    pub file_name: String,
    pub source_language: String,
    pub target_language: String,
    pub status: JobStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub s3_input_key: String,
    pub s3_output_key: Option<String>,
    pub original_text: String,
    pub translated_text: Option<String>,
    /// Unix seconds
    pub expires_at: i64,
    pub download_url: Option<String>,
}

impl From<JobView> for TranslationJobResponse {
    fn from(view: JobView) -> Self {
        let JobView { job, download_url } = view;
        Self {
            id: job.id,
            user_id: job.owner_id,
            file_name: job.file_name,
            source_language: job.source_language,
            target_language: job.target_language,
            status: job.status,
            created_at: job.created_at,
            updated_at: job.updated_at,
            completed_at: job.completed_at,
            s3_input_key: job.input_location,
            s3_output_key: job.output_location,
            original_text: job.original_content,
            translated_text: job.translated_content,
            expires_at: job.expires_at.timestamp(),
            download_url,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}
