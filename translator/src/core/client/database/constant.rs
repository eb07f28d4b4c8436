pub const JOBS_COLLECTION: &str = "translation_jobs";
