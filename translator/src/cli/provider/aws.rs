use clap::Args;
use serde::Serialize;
use url::Url;

/// Parameters used to config AWS.
#[derive(Debug, Clone, Args, Serialize)]
pub struct AWSConfigCliArgs {
    /// Use this flag to enable AWS provider.
    #[arg(long)]
    pub aws: bool,

    /// The prefix value.
    /// And added to the start of each resource name if available
    #[arg(env = "TRANSLATOR_AWS_PREFIX", long, default_value = None)]
    pub aws_prefix: Option<String>,

    /// Override the endpoint for every AWS client (localstack, minio).
    #[arg(env = "TRANSLATOR_AWS_ENDPOINT_URL", long)]
    pub aws_endpoint_url: Option<Url>,
}
