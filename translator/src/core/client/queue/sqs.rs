use crate::core::client::queue::QueueError;
use crate::{
    core::client::queue::QueueClient,
    types::{params::cloud_provider::AWSCredentials, params::QueueArgs, queue::QueueType},
    TranslatorError,
};
use async_trait::async_trait;
use aws_config::SdkConfig;
use aws_sdk_sqs::types::QueueAttributeName;
use aws_sdk_sqs::Client;
use omniqueue::backends::{SqsBackend, SqsConfig, SqsConsumer};
use omniqueue::Delivery;
use std::collections::HashMap;
use std::time::Duration;
use strum::IntoEnumIterator;

#[derive(Clone, Debug)]
pub struct InnerSQS(Client);

impl InnerSQS {
    /// Creates a new instance of InnerSQS with the provided AWS configuration.
    pub fn new(aws_config: &SdkConfig) -> Self {
        let sqs_config_builder = aws_sdk_sqs::config::Builder::from(aws_config);
        let client = Client::from_conf(sqs_config_builder.build());
        Self(client)
    }

    pub fn client(&self) -> &Client {
        &self.0
    }

    /// get_queue_url_from_client - Get the queue URL from the client
    /// This function returns the queue URL based on the queue name.
    pub async fn get_queue_url_from_client(&self, queue_name: &str) -> Result<String, QueueError> {
        Ok(self
            .client()
            .get_queue_url()
            .queue_name(queue_name)
            .send()
            .await?
            .queue_url()
            .ok_or_else(|| QueueError::FailedToGetQueueUrl(queue_name.to_string()))?
            .to_string())
    }

    /// get_queue_name_from_type - Get the queue specific name from its type
    pub fn get_queue_name_from_type(name: &str, queue_type: &QueueType) -> String {
        name.replace("{}", &queue_type.to_string())
    }

    /// Create a new queue with the given name
    pub async fn create_queue(&self, queue_name: &str, visibility_timeout: u32) -> Result<String, TranslatorError> {
        let mut attributes = HashMap::new();
        attributes.insert(QueueAttributeName::VisibilityTimeout, visibility_timeout.to_string());
        let res = self
            .client()
            .create_queue()
            .queue_name(queue_name)
            .set_attributes(Some(attributes))
            .send()
            .await
            .map_err(|e| {
                TranslatorError::ResourceSetupError(format!("Failed to create SQS queue '{}': {}", queue_name, e))
            })?;

        Ok(res
            .queue_url()
            .ok_or_else(|| TranslatorError::ResourceSetupError("Failed to get SQS URL".to_string()))?
            .to_string())
    }

    /// ARN of the queue behind `queue_url`, needed to point bucket notifications at it.
    pub async fn get_queue_arn(&self, queue_url: &str) -> Result<String, TranslatorError> {
        let attributes = self
            .client()
            .get_queue_attributes()
            .queue_url(queue_url)
            .attribute_names(QueueAttributeName::QueueArn)
            .send()
            .await
            .map_err(|e| TranslatorError::ResourceSetupError(format!("Failed to get queue attributes: {}", e)))?;

        attributes
            .attributes()
            .and_then(|attributes| attributes.get(&QueueAttributeName::QueueArn))
            .cloned()
            .ok_or_else(|| TranslatorError::ResourceSetupError(format!("Queue {} has no ARN attribute", queue_url)))
    }
}

#[derive(Clone, Debug)]
pub struct SQS {
    pub inner: InnerSQS,
    queue_template_identifier: String,
}

impl SQS {
    /// new - Create a new SQS client; the queue template is prefixed like every other AWS resource.
    pub fn new(aws_config: &SdkConfig, args: &QueueArgs, credentials: &AWSCredentials) -> Self {
        Self {
            inner: InnerSQS::new(aws_config),
            queue_template_identifier: credentials.resource_name(&args.queue_template_identifier),
        }
    }

    pub fn client(&self) -> &Client {
        self.inner.client()
    }

    /// get_queue_name - Get the queue name
    /// The template contains "{}" which is replaced with the queue type
    pub fn get_queue_name(&self, queue_type: &QueueType) -> Result<String, QueueError> {
        let name = InnerSQS::get_queue_name_from_type(&self.queue_template_identifier, queue_type);
        if name.is_empty() || name.len() > 80 {
            return Err(QueueError::InvalidQueueName(name));
        }
        Ok(name)
    }

    /// get_consumer - Get the consumer for the given queue
    async fn get_consumer(&self, queue: &QueueType) -> Result<SqsConsumer, QueueError> {
        let queue_name = self.get_queue_name(queue)?;
        tracing::debug!("Getting queue url for queue name {}", queue_name);
        let queue_url = self.inner.get_queue_url_from_client(queue_name.as_str()).await?;
        tracing::debug!("Found queue url {}", queue_url);

        let consumer =
            SqsBackend::builder(SqsConfig { queue_dsn: queue_url, override_endpoint: false }).build_consumer().await?;
        Ok(consumer)
    }
}

#[async_trait]
impl QueueClient for SQS {
    /// **send_message** - Send a message to the queue
    /// It returns a Result<(), QueueError> indicating whether the operation was successful or not
    async fn send_message(&self, queue: QueueType, payload: String, delay: Option<Duration>) -> Result<(), QueueError> {
        let queue_name = self.get_queue_name(&queue)?;
        let queue_url = self.inner.get_queue_url_from_client(queue_name.as_str()).await?;

        let mut send_message_request = self.inner.client().send_message().queue_url(&queue_url).message_body(&payload);

        if let Some(delay_duration) = delay {
            send_message_request = send_message_request.delay_seconds(delay_duration.as_secs() as i32);
        }

        send_message_request.send().await?;

        tracing::debug!("Sent message to queue {}", queue_name);

        Ok(())
    }

    /// Receive at most one message and wrap it as an omniqueue delivery so the
    /// worker can ack it once handled.
    async fn consume_message_from_queue(&self, queue: QueueType) -> Result<Delivery, QueueError> {
        let queue_name = self.get_queue_name(&queue)?;
        let queue_url = self.inner.get_queue_url_from_client(queue_name.as_str()).await?;

        let messages = self
            .inner
            .client()
            .receive_message()
            .queue_url(&queue_url)
            .max_number_of_messages(1)
            .send()
            .await?;

        let Some(message) = messages.messages.as_ref().and_then(|messages| messages.first()) else {
            return Err(omniqueue::QueueError::NoData.into());
        };

        let consumer = self.get_consumer(&queue).await?;
        Ok(consumer.wrap_message(message))
    }

    async fn health_check(&self) -> Result<(), QueueError> {
        for queue in QueueType::iter() {
            let queue_name = self.get_queue_name(&queue)?;
            self.inner.get_queue_url_from_client(&queue_name).await?;
        }
        Ok(())
    }
}
