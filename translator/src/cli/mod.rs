use clap::{Parser, Subcommand};

pub mod database;
pub mod provider;
pub mod queue;
pub mod server;
pub mod service;
pub mod storage;
pub mod translation;

#[derive(Parser, Debug)]
#[command(
    name = "translator",
    about = "Document translation service",
    long_about = "Accepts documents over HTTP, stores them in S3, dispatches them to translation workers over SQS \
    and tracks every job in MongoDB until it completes or fails.",
    after_help = "Examples:\n  \
    translator setup --aws --aws-s3 --aws-sqs --mongodb\n  \
    translator run --aws --aws-s3 --aws-sqs --mongodb --aws-translate"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the translator service (HTTP server and queue workers)
    Run {
        #[command(flatten)]
        run_command: Box<RunCmd>,
    },
    /// Create the buckets, queues, bucket notification and ledger indexes
    Setup {
        #[command(flatten)]
        setup_command: Box<SetupCmd>,
    },
}

#[derive(Parser, Debug, Clone)]
pub struct RunCmd {
    #[clap(flatten)]
    pub aws_config_args: provider::aws::AWSConfigCliArgs,

    #[clap(flatten)]
    pub aws_s3_args: storage::aws_s3::AWSS3CliArgs,

    #[clap(flatten)]
    pub aws_sqs_args: queue::aws_sqs::AWSSQSCliArgs,

    #[clap(flatten)]
    pub mongodb_args: database::mongodb::MongoDBCliArgs,

    #[clap(flatten)]
    pub aws_translate_args: translation::aws_translate::AWSTranslateCliArgs,

    #[clap(flatten)]
    pub server_args: server::ServerCliArgs,

    #[clap(flatten)]
    pub service_args: service::ServiceCliArgs,
}

#[derive(Parser, Debug, Clone)]
pub struct SetupCmd {
    #[clap(flatten)]
    pub aws_config_args: provider::aws::AWSConfigCliArgs,

    #[clap(flatten)]
    pub aws_s3_args: storage::aws_s3::AWSS3CliArgs,

    #[clap(flatten)]
    pub aws_sqs_args: queue::aws_sqs::AWSSQSCliArgs,

    #[clap(flatten)]
    pub mongodb_args: database::mongodb::MongoDBCliArgs,
}
