use clap::Args;

/// Parameters used to config the server.
#[derive(Debug, Clone, Args)]
#[group()]
pub struct ServerCliArgs {
    /// The host to listen on.
    #[arg(env = "TRANSLATOR_HOST", long, default_value = "127.0.0.1")]
    pub host: String,

    /// The port to listen on.
    #[arg(env = "TRANSLATOR_PORT", long, default_value = "3000")]
    pub port: u16,

    /// Header carrying the claims already verified by the authentication layer, as a JSON object.
    #[arg(env = "TRANSLATOR_IDENTITY_HEADER", long, default_value = "x-auth-claims")]
    pub identity_header: String,
}
