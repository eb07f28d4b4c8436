use mongodb::bson;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DatabaseError {
    #[error("Item already exists: {0}")]
    ItemAlreadyExists(String),

    /// The record changed since it was read (version mismatch) or no longer exists
    #[error("Update failed: {0}")]
    UpdateFailed(String),

    #[error("No update found: {0}")]
    NoUpdateFound(String),

    #[error("Failed to serialize document: {0}")]
    FailedToSerializeDocument(String),

    #[error("Mongo error: {0}")]
    MongoError(#[from] mongodb::error::Error),

    #[error("Bson serialization error: {0}")]
    BsonSerError(#[from] bson::ser::Error),
}
