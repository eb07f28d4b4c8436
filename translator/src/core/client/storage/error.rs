use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::get_object::GetObjectError;
use aws_sdk_s3::operation::head_bucket::HeadBucketError;
use aws_sdk_s3::operation::put_object::PutObjectError;
use aws_sdk_s3::presigning::PresigningConfigError;
use aws_sdk_s3::primitives::ByteStreamError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to put object: {0}")]
    PutObjectError(#[from] SdkError<PutObjectError>),

    #[error("Failed to get object: {0}")]
    GetObjectError(#[from] SdkError<GetObjectError>),

    #[error("Failed to reach bucket: {0}")]
    HeadBucketError(#[from] SdkError<HeadBucketError>),

    #[error("Failed to read object stream: {0}")]
    ObjectStreamError(#[from] ByteStreamError),

    #[error("Invalid presigning configuration: {0}")]
    PresigningConfigError(#[from] PresigningConfigError),

    #[error("Invalid bucket name: {0}")]
    InvalidBucketName(String),

    #[error("Storage error: {0}")]
    Other(String),
}
