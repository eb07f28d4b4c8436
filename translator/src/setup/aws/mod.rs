pub(crate) mod s3;
pub(crate) mod sqs;
