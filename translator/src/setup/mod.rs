use crate::cli::SetupCmd;
use crate::core::client::storage::StorageBucket;
use crate::core::client::{MongoDbClient, AWSS3, SQS};
use crate::types::params::cloud_provider::AWSCredentials;
use crate::types::params::database::DatabaseArgs;
use crate::types::params::{QueueArgs, StorageArgs};
use crate::types::queue::QueueType;
use crate::{TranslatorError, TranslatorResult};
use tracing::{debug, info};

pub(crate) mod aws;

/// Creates every resource the service needs. Safe to run again on existing infrastructure.
///
/// Order matters: the storage event queue must exist and accept bucket messages
/// before the input bucket can point its notifications at it.
pub async fn setup(setup_cmd: &SetupCmd) -> TranslatorResult<()> {
    let credentials = AWSCredentials::from(setup_cmd.aws_config_args.clone());
    let aws_config = credentials.get_aws_config().await;

    let queue_params = QueueArgs::try_from(setup_cmd.aws_sqs_args.clone())?;
    let storage_params = StorageArgs::try_from(setup_cmd.aws_s3_args.clone())?;
    let database_params = DatabaseArgs::try_from(setup_cmd.mongodb_args.clone())?;
    debug!("Queue Params: {:?}", queue_params);
    debug!("Storage Params: {:?}", storage_params);

    info!("Setting up queues");
    let sqs = SQS::new(&aws_config, &queue_params, &credentials);
    let queues = aws::sqs::setup_queues(&sqs).await?;

    info!("Setting up buckets");
    let s3 = AWSS3::new(&aws_config, &storage_params, &credentials)?;
    aws::s3::setup_buckets(&s3).await?;

    info!("Setting up storage notifications");
    let storage_event_queue = queues.get(&QueueType::StorageEvent).ok_or_else(|| {
        TranslatorError::ResourceSetupError(format!("Queue {} was not set up", QueueType::StorageEvent))
    })?;
    aws::sqs::allow_bucket_notifications(&sqs.inner, storage_event_queue, s3.bucket_name(StorageBucket::Input))
        .await?;
    aws::s3::setup_input_notifications(&s3, &storage_event_queue.arn).await?;

    info!("Setting up ledger indexes");
    let database = MongoDbClient::new(&database_params).await?;
    database.create_indexes().await?;

    info!("Setup completed");
    Ok(())
}
