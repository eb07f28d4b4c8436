use crate::cli::provider::aws::AWSConfigCliArgs;
use aws_config::SdkConfig;
use url::Url;

#[derive(Debug, Clone)]
pub struct AWSCredentials {
    pub prefix: Option<String>,
    pub endpoint_url: Option<Url>,
}

impl AWSCredentials {
    pub async fn get_aws_config(&self) -> SdkConfig {
        let loader = aws_config::from_env();
        match &self.endpoint_url {
            Some(endpoint) => loader.endpoint_url(endpoint.as_str().trim_end_matches('/')).load().await,
            None => loader.load().await,
        }
    }

    /// Applies the configured prefix to a resource name.
    pub fn resource_name(&self, name: &str) -> String {
        match &self.prefix {
            Some(prefix) if !prefix.is_empty() => format!("{}-{}", prefix, name),
            _ => name.to_string(),
        }
    }
}

impl From<AWSConfigCliArgs> for AWSCredentials {
    fn from(args: AWSConfigCliArgs) -> Self {
        Self { prefix: args.aws_prefix, endpoint_url: args.aws_endpoint_url }
    }
}
