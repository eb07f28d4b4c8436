use std::collections::HashMap;

use aws_sdk_sqs::types::QueueAttributeName;
use strum::IntoEnumIterator as _;
use tracing::info;

use crate::core::client::queue::sqs::{InnerSQS, SQS};
use crate::types::queue::QueueType;
use crate::{TranslatorError, TranslatorResult};

/// Seconds a received message stays invisible to other consumers
const VISIBILITY_TIMEOUT_SECS: u32 = 300;

/// A queue as it exists after setup
#[derive(Debug, Clone)]
pub struct QueueResource {
    pub url: String,
    pub arn: String,
}

/// Creates every queue the service consumes, reusing the ones that already exist.
pub async fn setup_queues(sqs: &SQS) -> TranslatorResult<HashMap<QueueType, QueueResource>> {
    let mut queues = HashMap::new();
    for queue_type in QueueType::iter() {
        let queue_name = sqs.get_queue_name(&queue_type)?;

        let url = match sqs.inner.get_queue_url_from_client(&queue_name).await {
            Ok(url) => {
                info!("SQS queue already exists, skipping creation. Queue Type: {}", queue_type);
                url
            }
            Err(_) => {
                let url = sqs.inner.create_queue(&queue_name, VISIBILITY_TIMEOUT_SECS).await?;
                info!("Queue created for type {}", queue_type);
                url
            }
        };
        let arn = sqs.inner.get_queue_arn(&url).await?;
        queues.insert(queue_type, QueueResource { url, arn });
    }
    Ok(queues)
}

/// Lets the input bucket publish its notifications to the storage event queue.
pub async fn allow_bucket_notifications(
    sqs: &InnerSQS,
    queue: &QueueResource,
    bucket_name: &str,
) -> TranslatorResult<()> {
    let policy = serde_json::json!({
        "Version": "2012-10-17",
        "Statement": [{
            "Sid": "AllowInputBucketNotifications",
            "Effect": "Allow",
            "Principal": { "Service": "s3.amazonaws.com" },
            "Action": "sqs:SendMessage",
            "Resource": queue.arn,
            "Condition": { "ArnLike": { "aws:SourceArn": format!("arn:aws:s3:::{}", bucket_name) } }
        }]
    });

    sqs.client()
        .set_queue_attributes()
        .queue_url(&queue.url)
        .attributes(QueueAttributeName::Policy, policy.to_string())
        .send()
        .await
        .map_err(|e| TranslatorError::ResourceSetupError(format!("Failed to set policy on {}: {}", queue.url, e)))?;
    info!("Queue policy set for bucket {}", bucket_name);
    Ok(())
}
