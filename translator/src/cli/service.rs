use clap::Args;

use crate::types::constant::{
    DEFAULT_CHUNK_SIZE, DEFAULT_DOWNLOAD_URL_TTL_SECS, DEFAULT_MAX_CONCURRENT_JOBS, DEFAULT_RETENTION_DAYS,
};

/// Parameters tuning the job lifecycle.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct ServiceCliArgs {
    /// Number of characters sent to the translation provider per call.
    #[arg(env = "TRANSLATOR_CHUNK_SIZE", long, default_value_t = DEFAULT_CHUNK_SIZE)]
    pub chunk_size: usize,

    /// Days after creation at which a job record may be purged.
    #[arg(env = "TRANSLATOR_RETENTION_DAYS", long, default_value_t = DEFAULT_RETENTION_DAYS)]
    pub retention_days: i64,

    /// Lifetime of the signed download URL attached to completed jobs.
    #[arg(env = "TRANSLATOR_DOWNLOAD_URL_TTL_SECS", long, default_value_t = DEFAULT_DOWNLOAD_URL_TTL_SECS)]
    pub download_url_ttl_secs: u64,

    /// Maximum number of messages handled concurrently by each queue worker.
    #[arg(env = "TRANSLATOR_MAX_CONCURRENT_JOBS", long, default_value_t = DEFAULT_MAX_CONCURRENT_JOBS)]
    pub max_concurrent_jobs: usize,
}
