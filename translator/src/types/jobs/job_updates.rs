use crate::error::job::JobError;
use crate::types::jobs::types::JobStatus;
use chrono::{DateTime, Utc};

/// Defining a structure that contains the changes to be made in the job object,
/// id, owner and created at are not allowed to be changed
// version and updated_at will always be updated when this object updates the job
#[derive(Debug, Clone, PartialEq)]
pub struct JobItemUpdates {
    pub status: Option<JobStatus>,
    pub translated_content: Option<String>,
    pub output_location: Option<String>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Default for JobItemUpdates {
    fn default() -> Self {
        Self::new()
    }
}

impl JobItemUpdates {
    pub fn new() -> Self {
        JobItemUpdates { status: None, translated_content: None, output_location: None, completed_at: None }
    }

    pub fn update_status(mut self, status: JobStatus) -> JobItemUpdates {
        self.status = Some(status);
        self
    }

    /// Marks the job completed together with everything a completed job must carry.
    pub fn complete(mut self, translated_content: String, output_location: String) -> JobItemUpdates {
        self.status = Some(JobStatus::Completed);
        self.translated_content = Some(translated_content);
        self.output_location = Some(output_location);
        self.completed_at = Some(Utc::now());
        self
    }

    /// Output fields and `completed_at` travel together with `status = completed`, and only with it.
    pub fn build(self) -> Result<JobItemUpdates, JobError> {
        if self.status.is_none()
            && self.translated_content.is_none()
            && self.output_location.is_none()
            && self.completed_at.is_none()
        {
            return Err(JobError::Other("No field to be updated, likely a false call".to_string()));
        }
        let completing = self.status == Some(JobStatus::Completed);
        let has_output =
            self.translated_content.is_some() && self.output_location.is_some() && self.completed_at.is_some();
        let has_any_output =
            self.translated_content.is_some() || self.output_location.is_some() || self.completed_at.is_some();
        if completing != has_output || (!completing && has_any_output) {
            return Err(JobError::Other(
                "Completion fields must be set together with the completed status".to_string(),
            ));
        }
        Ok(self)
    }
}
