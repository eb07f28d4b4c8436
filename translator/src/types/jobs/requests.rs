//! Requests entering the job lifecycle, validated at the boundary.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::job::JobError;
use crate::types::constant::TEXT_CONTENT_TYPE;
use crate::types::jobs::document::DocumentKind;
use crate::types::languages::is_supported;

/// A document submission as received by the ingress adapter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CreateJobRequest {
    /// Identity established by the authentication layer, if any
    pub owner_id: Option<String>,
    pub file_name: Option<String>,
    pub source_language: Option<String>,
    pub target_language: Option<String>,
    /// Document content in transport form
    pub content: Option<String>,
    /// Defaults to `text/plain`
    pub content_type: Option<String>,
}

/// A submission whose fields are all present and supported.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedCreateJob {
    pub owner_id: String,
    pub file_name: String,
    pub source_language: String,
    pub target_language: String,
    pub content: String,
    pub kind: DocumentKind,
}

fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl CreateJobRequest {
    pub fn validate(self) -> Result<ValidatedCreateJob, JobError> {
        let owner_id = present(self.owner_id).ok_or(JobError::Unauthorized)?;

        let file_name = present(self.file_name);
        let source_language = present(self.source_language);
        let target_language = present(self.target_language);
        let content = present(self.content);

        let (Some(file_name), Some(source_language), Some(target_language), Some(content)) =
            (file_name.clone(), source_language.clone(), target_language.clone(), content.clone())
        else {
            let missing: Vec<&str> = [
                ("fileName", file_name.is_none()),
                ("sourceLanguage", source_language.is_none()),
                ("targetLanguage", target_language.is_none()),
                ("fileContent", content.is_none()),
            ]
            .into_iter()
            .filter_map(|(name, absent)| absent.then_some(name))
            .collect();
            return Err(JobError::Validation(format!("Missing required fields: {}", missing.join(", "))));
        };

        for language in [&source_language, &target_language] {
            if !is_supported(language) {
                return Err(JobError::Validation(format!("Unsupported language: {}", language)));
            }
        }

        let content_type = self.content_type.unwrap_or_else(|| TEXT_CONTENT_TYPE.to_string());
        Ok(ValidatedCreateJob {
            owner_id,
            file_name,
            source_language,
            target_language,
            content,
            kind: DocumentKind::from_content_type(&content_type),
        })
    }
}

/// One-way message from the dispatcher to the worker pipeline.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct WorkerInvocation {
    pub job_id: Uuid,
    /// Document content in transport form (base64 for binary documents)
    pub content: String,
    pub source_language: String,
    pub target_language: String,
    pub file_name: String,
    #[serde(alias = "user_id")]
    pub owner_id: String,
    /// Absent in older payloads; the file extension decides then
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

impl WorkerInvocation {
    pub fn document_kind(&self) -> DocumentKind {
        DocumentKind::detect(&self.file_name, self.content_type.as_deref())
    }
}

/// Object-created notification from the storage event source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEvent {
    pub bucket: String,
    /// Key exactly as delivered, URL-encoded
    pub key: String,
    pub event_name: String,
}

impl StorageEvent {
    pub fn is_object_created(&self) -> bool {
        self.event_name.starts_with("ObjectCreated")
    }

    /// Keys arrive form-encoded: `+` is a space and everything else is percent-encoded.
    pub fn decoded_key(&self) -> Result<String, JobError> {
        let spaced = self.key.replace('+', " ");
        urlencoding::decode(&spaced)
            .map(|key| key.into_owned())
            .map_err(|e| JobError::MalformedStorageKey(format!("{} ({})", self.key, e)))
    }
}
