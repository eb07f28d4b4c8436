use serde::{Deserialize, Serialize};

/// Lifecycle of a translation job.
///
/// `Pending -> Processing -> {Completed | Failed}` and `Pending -> Failed`.
/// `Completed` and `Failed` are terminal.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum JobStatus {
    /// Recorded by ingress, waiting for a worker to pick it up
    Pending,
    /// A worker has taken the job
    Processing,
    /// Translation stored and recorded
    Completed,
    /// The job could not be translated
    Failed,
}

impl JobStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, JobStatus::Completed | JobStatus::Failed)
    }

    /// Whether moving from `self` to `next` is a legal transition.
    /// Re-entering `Processing` is not a transition; callers treat it as a no-op.
    pub fn can_transition_to(&self, next: JobStatus) -> bool {
        matches!(
            (self, next),
            (JobStatus::Pending, JobStatus::Processing)
                | (JobStatus::Pending, JobStatus::Failed)
                | (JobStatus::Processing, JobStatus::Completed)
                | (JobStatus::Processing, JobStatus::Failed)
        )
    }
}
