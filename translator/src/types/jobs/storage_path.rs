use crate::error::job::JobError;
use crate::types::constant::{INPUT_NAMESPACE, OUTPUT_NAMESPACE};
use uuid::Uuid;

/// Location of a job's documents: `{namespace}/{owner_id}/{job_id}/{file_name}`.
///
/// The storage-triggered ingress recovers the job from this layout, so both
/// directions live here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePath {
    pub owner_id: String,
    pub job_id: String,
    pub file_name: String,
}

impl StoragePath {
    pub fn new(owner_id: &str, job_id: Uuid, file_name: &str) -> Self {
        Self { owner_id: owner_id.to_string(), job_id: job_id.to_string(), file_name: file_name.to_string() }
    }

    pub fn input_key(&self) -> String {
        self.key_in(INPUT_NAMESPACE)
    }

    pub fn output_key(&self) -> String {
        self.key_in(OUTPUT_NAMESPACE)
    }

    fn key_in(&self, namespace: &str) -> String {
        format!("{}/{}/{}/{}", namespace, self.owner_id, self.job_id, self.file_name)
    }

    /// Parses a key from the input namespace.
    /// The file name may itself contain `/`; everything after the job segment belongs to it.
    pub fn parse_input_key(key: &str) -> Result<Self, JobError> {
        let malformed = || JobError::MalformedStorageKey(key.to_string());
        let mut segments = key.splitn(4, '/');

        let namespace = segments.next().ok_or_else(malformed)?;
        if namespace != INPUT_NAMESPACE {
            return Err(malformed());
        }
        let owner_id = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        let job_id = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;
        let file_name = segments.next().filter(|s| !s.is_empty()).ok_or_else(malformed)?;

        Ok(Self { owner_id: owner_id.to_string(), job_id: job_id.to_string(), file_name: file_name.to_string() })
    }

    /// Job ids are UUIDs; a segment that is not one cannot name a recorded job.
    pub fn job_uuid(&self) -> Option<Uuid> {
        Uuid::parse_str(&self.job_id).ok()
    }
}
