use crate::cli::server::ServerCliArgs;
use crate::cli::service::ServiceCliArgs;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct ServerParams {
    pub host: String,
    pub port: u16,
    pub identity_header: String,
}

impl From<ServerCliArgs> for ServerParams {
    fn from(args: ServerCliArgs) -> Self {
        Self { host: args.host, port: args.port, identity_header: args.identity_header.to_lowercase() }
    }
}

#[derive(Debug, Clone)]
pub struct ServiceParams {
    pub chunk_size: usize,
    pub retention: chrono::Duration,
    pub download_url_ttl: Duration,
    pub max_concurrent_jobs: usize,
}

impl From<ServiceCliArgs> for ServiceParams {
    fn from(args: ServiceCliArgs) -> Self {
        Self {
            chunk_size: args.chunk_size.max(1),
            retention: chrono::Duration::days(args.retention_days),
            download_url_ttl: Duration::from_secs(args.download_url_ttl_secs),
            max_concurrent_jobs: args.max_concurrent_jobs.max(1),
        }
    }
}
