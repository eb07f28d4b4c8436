pub mod controller;
pub mod event_handler;
pub mod parser;
pub mod service;
pub mod traits;

use controller::worker_controller::WorkerController;

use crate::{core::config::Config, TranslatorResult};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// initialize_worker - Starts a worker for every queue in the background
/// Returns the controller used to shut them down.
pub async fn initialize_worker(config: Arc<Config>) -> TranslatorResult<WorkerController> {
    let controller = WorkerController::new(config, CancellationToken::new());

    let runner = controller.clone();
    tokio::spawn(async move {
        match runner.run().await {
            Ok(_) => tracing::info!("Consumers stopped"),
            Err(e) => tracing::error!(error = %e, "Consumers stopped with an error"),
        }
    });

    tracing::info!("Consumers initialized successfully");
    Ok(controller)
}
