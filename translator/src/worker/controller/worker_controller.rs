use crate::core::config::Config;
use crate::error::event::EventSystemError;
use crate::error::event::EventSystemResult;
use crate::types::queue::QueueType;
use crate::worker::controller::event_worker::EventWorker;

use futures::future::try_join_all;
use std::sync::Arc;
use std::sync::Mutex;
use strum::IntoEnumIterator as _;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, info_span, warn, Instrument};

#[derive(Clone)]
pub struct WorkerController {
    config: Arc<Config>,
    workers: Arc<Mutex<Vec<Arc<EventWorker>>>>,
    cancellation_token: CancellationToken,
}

impl WorkerController {
    /// new - Create a new WorkerController
    /// # Arguments
    /// * `config` - The configuration shared with every worker
    /// * `cancellation_token` - Parent of every worker's shutdown token
    pub fn new(config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self { config, workers: Arc::new(Mutex::new(Vec::new())), cancellation_token }
    }

    /// workers - Get the list of workers started so far
    /// # Errors
    /// * `EventSystemError` - If the worker list lock is poisoned
    pub fn workers(&self) -> EventSystemResult<Vec<Arc<EventWorker>>> {
        let workers = self.workers.lock().map_err(|e| EventSystemError::MutexPoisonError(e.to_string()))?;
        Ok(workers.clone())
    }

    /// run - Spawn one event worker per queue and wait for all of them
    /// Runs until shutdown, or until a worker fails with an infrastructure error.
    pub async fn run(&self) -> EventSystemResult<()> {
        let mut worker_set = tokio::task::JoinSet::new();
        for queue_type in Self::queues() {
            let self_clone = self.clone();
            worker_set.spawn(async move { self_clone.create_span(&queue_type).await });
        }
        while let Some(result) = worker_set.join_next().await {
            result??;
        }
        Ok(())
    }

    /// Every queue the service consumes: worker invocations and storage notifications
    fn queues() -> Vec<QueueType> {
        QueueType::iter().collect()
    }

    async fn create_event_handler(&self, queue_type: &QueueType) -> EventSystemResult<Arc<EventWorker>> {
        let worker_token = self.cancellation_token.child_token();
        let worker = Arc::new(EventWorker::new(queue_type.clone(), self.config.clone(), worker_token));

        let mut workers = self.workers.lock().map_err(|e| EventSystemError::MutexPoisonError(e.to_string()))?;
        workers.push(worker.clone());
        drop(workers);

        Ok(worker)
    }

    /// Create a span for a queue type and run its worker inside it.
    /// Returns `Ok` on graceful shutdown and `Err` when the worker fails.
    async fn create_span(&self, q: &QueueType) -> EventSystemResult<()> {
        let span = info_span!("worker", queue = %q);

        async move {
            let handler = self.create_event_handler(q).await.inspect_err(|e| {
                error!("Failed to create handler for queue type {}: {:?}", q, e);
            })?;

            match handler.run().await {
                Ok(_) => {
                    warn!("Worker for queue type {} completed (this is normal during shutdown)", q);
                    Ok(())
                }
                Err(e) => {
                    error!("Worker for queue type {} failed with infrastructure error: {:?}", q, e);
                    Err(e)
                }
            }
        }
        .instrument(span)
        .await
    }

    /// shutdown - Signal every worker to stop taking messages
    /// Workers finish the messages they hold before exiting.
    pub async fn shutdown(&self) -> EventSystemResult<()> {
        info!("Initiating WorkerController graceful shutdown");

        let workers = self.workers()?;
        info!("Signaling {} workers to shutdown gracefully", workers.len());

        let futures: Vec<_> = workers.iter().map(|worker| worker.shutdown()).collect();
        try_join_all(futures).await?;
        self.cancellation_token.cancel();

        info!("WorkerController shutdown completed");
        Ok(())
    }
}
