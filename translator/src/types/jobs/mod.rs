pub mod document;
pub mod job_item;
pub mod job_updates;
pub mod requests;
pub mod serde_helpers;
pub mod storage_path;
pub mod types;
