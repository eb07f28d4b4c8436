use clap::Args;

/// Parameters used to config AWS SQS.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct AWSSQSCliArgs {
    /// Use the AWS sqs client
    #[arg(long)]
    pub aws_sqs: bool,

    /// The ARN / Name template of the queues.
    /// ARN: arn:aws:sqs:region:accountID:name
    /// {} will be replaced by Queue Type, i.e. for the storage event queue: translator_storage_event_queue
    #[arg(env = "TRANSLATOR_AWS_SQS_QUEUE_IDENTIFIER", long, default_value = Some("translator_{}_queue"))]
    pub queue_identifier: Option<String>,
}
