use std::time::{Duration, Instant};

use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::types::ServerSideEncryption;
use aws_sdk_s3::Client;
use bytes::Bytes;
use opentelemetry::KeyValue;
use tracing::debug;

use super::{StorageBucket, StorageClient, StorageError};
use crate::types::params::cloud_provider::AWSCredentials;
use crate::types::params::StorageArgs;
use crate::utils::metrics::TRANSLATOR_METRICS;

/// AWSS3 is a struct that represents an AWS S3 client bound to the input and output buckets.
#[derive(Clone, Debug)]
pub struct AWSS3 {
    client: Client,
    input_bucket: String,
    output_bucket: String,
}

impl AWSS3 {
    /// Creates a new instance of AWSS3 with the provided client and bucket names.
    /// When a custom endpoint is configured (LocalStack, MinIO) path-style addressing is forced.
    pub fn new(aws_config: &SdkConfig, args: &StorageArgs, credentials: &AWSCredentials) -> Result<Self, StorageError> {
        let mut s3_config_builder = aws_sdk_s3::config::Builder::from(aws_config);
        if credentials.endpoint_url.is_some() {
            s3_config_builder = s3_config_builder.force_path_style(true);
        }
        let client = Client::from_conf(s3_config_builder.build());
        Ok(Self {
            client,
            input_bucket: Self::parse_bucket_identifier(credentials, &args.input_bucket_identifier)?,
            output_bucket: Self::parse_bucket_identifier(credentials, &args.output_bucket_identifier)?,
        })
    }

    /// Applies the resource prefix and checks the result against S3 naming rules.
    pub fn parse_bucket_identifier(credentials: &AWSCredentials, identifier: &str) -> Result<String, StorageError> {
        let name = credentials.resource_name(identifier);
        let valid_chars = name.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '.');
        if !(3..=63).contains(&name.len()) || !valid_chars || name.starts_with('-') || name.ends_with('-') {
            return Err(StorageError::InvalidBucketName(name));
        }
        Ok(name)
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn bucket_name(&self, bucket: StorageBucket) -> &str {
        match bucket {
            StorageBucket::Input => &self.input_bucket,
            StorageBucket::Output => &self.output_bucket,
        }
    }
}

#[async_trait]
impl StorageClient for AWSS3 {
    /// get_data - Get the data from the bucket
    async fn get_data(&self, bucket: StorageBucket, key: &str) -> Result<Bytes, StorageError> {
        let start = Instant::now();
        let output = self.client.get_object().bucket(self.bucket_name(bucket)).key(key).send().await?;
        let data = output.body.collect().await?.into_bytes();
        debug!(%bucket, key, size = data.len(), "Fetched object from S3");
        let attributes = [KeyValue::new("storage_operation_name", "get_data")];
        TRANSLATOR_METRICS.storage_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
        Ok(data)
    }

    /// put_data - Put the data in the bucket, encrypted at rest with AES-256
    async fn put_data(
        &self,
        bucket: StorageBucket,
        key: &str,
        data: Bytes,
        content_type: &str,
    ) -> Result<(), StorageError> {
        let start = Instant::now();
        let size = data.len();
        self.client
            .put_object()
            .bucket(self.bucket_name(bucket))
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .server_side_encryption(ServerSideEncryption::Aes256)
            .send()
            .await?;
        debug!(%bucket, key, size, "Stored object in S3");
        let attributes = [KeyValue::new("storage_operation_name", "put_data")];
        TRANSLATOR_METRICS.storage_calls_response_time.record(start.elapsed().as_secs_f64(), &attributes);
        Ok(())
    }

    async fn presigned_get_url(&self, bucket: StorageBucket, key: &str, ttl: Duration) -> Result<String, StorageError> {
        let presigned = self
            .client
            .get_object()
            .bucket(self.bucket_name(bucket))
            .key(key)
            .presigned(PresigningConfig::expires_in(ttl)?)
            .await?;
        Ok(presigned.uri().to_string())
    }

    async fn health_check(&self) -> Result<(), StorageError> {
        for bucket in [StorageBucket::Input, StorageBucket::Output] {
            self.client.head_bucket().bucket(self.bucket_name(bucket)).send().await?;
        }
        Ok(())
    }
}
