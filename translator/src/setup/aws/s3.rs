use aws_sdk_s3::types::{
    BucketLocationConstraint, CreateBucketConfiguration, Event, FilterRule, FilterRuleName, NotificationConfiguration,
    NotificationConfigurationFilter, QueueConfiguration, S3KeyFilter,
};
use tracing::{info, warn};

use crate::core::client::storage::StorageBucket;
use crate::core::client::AWSS3;
use crate::types::constant::INPUT_NAMESPACE;
use crate::{TranslatorError, TranslatorResult};

const DEFAULT_REGION: &str = "us-east-1";

/// Creates the input and output buckets, reusing the ones that already exist.
pub async fn setup_buckets(s3: &AWSS3) -> TranslatorResult<()> {
    for bucket in [StorageBucket::Input, StorageBucket::Output] {
        let bucket_name = s3.bucket_name(bucket);
        if s3.client().head_bucket().bucket(bucket_name).send().await.is_ok() {
            warn!("S3 bucket {} already exists, skipping creation", bucket_name);
            continue;
        }

        let region = s3.client().config().region().map(|r| r.to_string()).unwrap_or_else(|| DEFAULT_REGION.to_string());
        info!("Creating New Bucket: {}", bucket_name);

        let mut bucket_builder = s3.client().create_bucket().bucket(bucket_name);
        if region != DEFAULT_REGION {
            let cfg = CreateBucketConfiguration::builder()
                .location_constraint(BucketLocationConstraint::from(region.as_str()))
                .build();
            bucket_builder = bucket_builder.create_bucket_configuration(cfg);
        }
        bucket_builder.send().await.map_err(|e| {
            TranslatorError::ResourceSetupError(format!("Failed to create S3 bucket '{}': {:?}", bucket_name, e))
        })?;
    }
    Ok(())
}

/// Routes object-created notifications under `input/` to the storage event queue.
pub async fn setup_input_notifications(s3: &AWSS3, queue_arn: &str) -> TranslatorResult<()> {
    let bucket_name = s3.bucket_name(StorageBucket::Input);

    let prefix = FilterRule::builder().name(FilterRuleName::Prefix).value(format!("{}/", INPUT_NAMESPACE)).build();
    let filter =
        NotificationConfigurationFilter::builder().key(S3KeyFilter::builder().filter_rules(prefix).build()).build();
    let queue_configuration = QueueConfiguration::builder()
        .id("translator-input-created")
        .queue_arn(queue_arn)
        .events(Event::S3ObjectCreated)
        .filter(filter)
        .build()
        .map_err(|e| TranslatorError::ResourceSetupError(format!("Invalid notification configuration: {}", e)))?;

    s3.client()
        .put_bucket_notification_configuration()
        .bucket(bucket_name)
        .notification_configuration(
            NotificationConfiguration::builder().queue_configurations(queue_configuration).build(),
        )
        .send()
        .await
        .map_err(|e| {
            TranslatorError::ResourceSetupError(format!("Failed to set notifications on '{}': {:?}", bucket_name, e))
        })?;
    info!("Object-created notifications of {} routed to {}", bucket_name, queue_arn);
    Ok(())
}
