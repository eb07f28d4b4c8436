pub mod cloud_provider;
pub mod database;
pub mod service;

use crate::cli::queue::aws_sqs::AWSSQSCliArgs;
use crate::cli::storage::aws_s3::AWSS3CliArgs;
use crate::TranslatorError;

#[derive(Debug, Clone)]
pub struct StorageArgs {
    pub input_bucket_identifier: String,
    pub output_bucket_identifier: String,
}

impl TryFrom<AWSS3CliArgs> for StorageArgs {
    type Error = TranslatorError;
    fn try_from(args: AWSS3CliArgs) -> Result<Self, Self::Error> {
        if !args.aws_s3 {
            return Err(TranslatorError::ConfigError("Storage provider is not selected, pass --aws-s3".to_string()));
        }
        Ok(Self {
            input_bucket_identifier: args
                .input_bucket_identifier
                .ok_or_else(|| TranslatorError::ConfigError("Input bucket identifier is required".to_string()))?,
            output_bucket_identifier: args
                .output_bucket_identifier
                .ok_or_else(|| TranslatorError::ConfigError("Output bucket identifier is required".to_string()))?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct QueueArgs {
    /// Name template where `{}` is replaced by the queue type
    pub queue_template_identifier: String,
}

impl TryFrom<AWSSQSCliArgs> for QueueArgs {
    type Error = TranslatorError;
    fn try_from(args: AWSSQSCliArgs) -> Result<Self, Self::Error> {
        if !args.aws_sqs {
            return Err(TranslatorError::ConfigError("Queue provider is not selected, pass --aws-sqs".to_string()));
        }
        let template = args
            .queue_identifier
            .ok_or_else(|| TranslatorError::ConfigError("Queue identifier is required".to_string()))?;
        if !template.contains("{}") {
            return Err(TranslatorError::ConfigError(format!(
                "Queue identifier '{}' must contain '{{}}' to be replaced by the queue type",
                template
            )));
        }
        Ok(Self { queue_template_identifier: template })
    }
}
