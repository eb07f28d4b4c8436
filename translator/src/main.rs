use clap::Parser as _;
use dotenvy::dotenv;
use std::sync::Arc;
use tracing::{debug, error, info};
use translator::cli::{Cli, Commands, RunCmd, SetupCmd};
use translator::core::config::Config;
use translator::server::setup_server;
use translator::setup::setup;
use translator::utils::logging::init_logging;
use translator::worker::initialize_worker;
use translator::{TranslatorError, TranslatorResult};

/// Start the server
#[tokio::main]
async fn main() {
    dotenv().ok();
    init_logging();
    info!("Starting translator");
    let cli = Cli::parse();

    match &cli.command {
        Commands::Run { run_command } => {
            info!("Executing run command with args: {:?}", run_command);
            match run_translator(run_command).await {
                Ok(_) => {
                    info!("Translator service stopped");
                }
                Err(e) => {
                    error!(
                        error = %e,
                        error_chain = ?e,
                        "Failed to start translator service"
                    );
                    panic!("Failed to start translator service: {}", e);
                }
            }
        }
        Commands::Setup { setup_command } => {
            info!("Executing setup command with args: {:?}", setup_command);
            match setup_translator(setup_command).await {
                Ok(_) => {
                    info!("Translator setup completed successfully");
                }
                Err(e) => {
                    error!(
                        error = %e,
                        error_chain = ?e,
                        "Failed to setup translator"
                    );
                    panic!("Failed to setup translator: {}", e);
                }
            }
        }
    }
}

async fn run_translator(run_cmd: &RunCmd) -> TranslatorResult<()> {
    let config = Arc::new(Config::setup(run_cmd).await?);
    debug!("Configuration initialized");

    let (address, server_handle) = setup_server(config.clone()).await?;
    info!(%address, "HTTP server listening");

    let worker_controller = initialize_worker(config.clone()).await?;

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| TranslatorError::RunCommandError(format!("Failed to listen for ctrl+c: {}", e)))?;

    worker_controller.shutdown().await?;
    server_handle
        .shutdown()
        .await
        .map_err(|e| TranslatorError::RunCommandError(format!("Server task failed: {}", e)))?;

    info!("Translator service shutting down");
    Ok(())
}

async fn setup_translator(setup_cmd: &SetupCmd) -> TranslatorResult<()> {
    setup(setup_cmd).await
}
