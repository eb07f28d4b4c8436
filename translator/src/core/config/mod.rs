use aws_config::SdkConfig;

use crate::core::error::TranslatorCoreResult;
use crate::worker::event_handler::translation::{BinaryDocumentTranslator, PlaceholderBinaryTranslator};
use crate::{
    cli::RunCmd,
    core::client::{
        queue::QueueClient, storage::StorageClient, translation::TranslationClient, AWSTranslate, DatabaseClient,
        MongoDbClient, AWSS3, SQS,
    },
    core::error::TranslatorCoreError,
    types::params::cloud_provider::AWSCredentials,
    types::params::database::DatabaseArgs,
    types::params::service::{ServerParams, ServiceParams},
    types::params::{QueueArgs, StorageArgs},
    TranslatorResult,
};

/// The app config. It is shared behind an `Arc` by the HTTP adapter and the queue workers.
pub struct Config {
    server_params: ServerParams,
    service_params: ServiceParams,
    /// The job ledger
    database: Box<dyn DatabaseClient>,
    /// Queue client
    queue: Box<dyn QueueClient>,
    /// Storage client
    storage: Box<dyn StorageClient>,
    /// Machine translation provider for plain text
    translation: Box<dyn TranslationClient>,
    /// Translator for binary documents
    binary_translator: Box<dyn BinaryDocumentTranslator>,
}

impl Config {
    /// Create a new config from already built clients
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        server_params: ServerParams,
        service_params: ServiceParams,
        database: Box<dyn DatabaseClient>,
        queue: Box<dyn QueueClient>,
        storage: Box<dyn StorageClient>,
        translation: Box<dyn TranslationClient>,
        binary_translator: Box<dyn BinaryDocumentTranslator>,
    ) -> Self {
        Self { server_params, service_params, database, queue, storage, translation, binary_translator }
    }

    /// Setup the translator
    pub async fn setup(run_cmd: &RunCmd) -> TranslatorResult<Self> {
        let aws_cred = AWSCredentials::from(run_cmd.aws_config_args.clone());
        let aws_config = aws_cred.get_aws_config().await;

        let db = DatabaseArgs::try_from(run_cmd.mongodb_args.clone())?;
        let storage_args = StorageArgs::try_from(run_cmd.aws_s3_args.clone())?;
        let queue_args = QueueArgs::try_from(run_cmd.aws_sqs_args.clone())?;

        let database = Self::build_database_client(&db).await?;
        let storage = Self::build_storage_client(&storage_args, &aws_config, &aws_cred)?;
        let queue = Self::build_queue_client(&queue_args, &aws_config, &aws_cred);
        let translation = Self::build_translation_client(run_cmd, &aws_config)?;

        Ok(Self::new(
            ServerParams::from(run_cmd.server_args.clone()),
            ServiceParams::from(run_cmd.service_args.clone()),
            database,
            queue,
            storage,
            translation,
            Box::new(PlaceholderBinaryTranslator),
        ))
    }

    async fn build_database_client(db_config: &DatabaseArgs) -> TranslatorCoreResult<Box<dyn DatabaseClient>> {
        Ok(Box::new(MongoDbClient::new(db_config).await?))
    }

    fn build_storage_client(
        storage_config: &StorageArgs,
        aws_config: &SdkConfig,
        aws_cred: &AWSCredentials,
    ) -> TranslatorCoreResult<Box<dyn StorageClient>> {
        Ok(Box::new(AWSS3::new(aws_config, storage_config, aws_cred)?))
    }

    fn build_queue_client(
        queue_config: &QueueArgs,
        aws_config: &SdkConfig,
        aws_cred: &AWSCredentials,
    ) -> Box<dyn QueueClient> {
        Box::new(SQS::new(aws_config, queue_config, aws_cred))
    }

    fn build_translation_client(
        run_cmd: &RunCmd,
        aws_config: &SdkConfig,
    ) -> TranslatorCoreResult<Box<dyn TranslationClient>> {
        if run_cmd.aws_translate_args.aws_translate {
            Ok(Box::new(AWSTranslate::new(aws_config)))
        } else {
            Err(TranslatorCoreError::InvalidProvider(
                "No translation provider selected, pass --aws-translate".to_string(),
            ))
        }
    }

    /// Returns the server config
    pub fn server_config(&self) -> &ServerParams {
        &self.server_params
    }

    /// Returns the service config
    pub fn service_config(&self) -> &ServiceParams {
        &self.service_params
    }

    /// Returns the database client
    pub fn database(&self) -> &dyn DatabaseClient {
        self.database.as_ref()
    }

    /// Returns the queue provider
    pub fn queue(&self) -> &dyn QueueClient {
        self.queue.as_ref()
    }

    /// Returns the storage provider
    pub fn storage(&self) -> &dyn StorageClient {
        self.storage.as_ref()
    }

    /// Returns the translation provider
    pub fn translation(&self) -> &dyn TranslationClient {
        self.translation.as_ref()
    }

    pub fn binary_translator(&self) -> &dyn BinaryDocumentTranslator {
        self.binary_translator.as_ref()
    }
}
