// Client abstractions module - contains all client interface traits

pub mod database;
pub mod queue;
pub mod storage;
pub mod translation;

// Re-export commonly used types
pub use database::{mongodb::MongoDbClient, DatabaseClient};
pub use queue::{sqs::SQS, QueueClient};
pub use storage::{s3::AWSS3, StorageClient};
pub use translation::{aws_translate::AWSTranslate, TranslationClient};
