/// Namespace of uploaded documents: `input/{owner_id}/{job_id}/{file_name}`
pub const INPUT_NAMESPACE: &str = "input";
/// Namespace of translated documents: `output/{owner_id}/{job_id}/{file_name}`
pub const OUTPUT_NAMESPACE: &str = "output";

pub const TEXT_CONTENT_TYPE: &str = "text/plain";
pub const PDF_CONTENT_TYPE: &str = "application/pdf";
pub const PDF_EXTENSION: &str = ".pdf";

pub const DEFAULT_CHUNK_SIZE: usize = 4000;
pub const DEFAULT_RETENTION_DAYS: i64 = 30;
pub const DEFAULT_DOWNLOAD_URL_TTL_SECS: u64 = 900;
pub const DEFAULT_MAX_CONCURRENT_JOBS: usize = 10;

/// Attempts made to apply a state transition when the stored version moved underneath us
pub const MAX_TRANSITION_ATTEMPTS: usize = 3;
