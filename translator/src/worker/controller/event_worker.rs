use crate::core::client::queue::QueueError;
use crate::core::config::Config;
use crate::error::{event::EventSystemResult, ConsumptionError};
use crate::types::queue::QueueType;
use crate::worker::event_handler::service::JobHandlerService;
use crate::worker::parser::storage_event_message::StorageEventMessage;
use crate::worker::parser::worker_invocation_message::WorkerInvocationMessage;
use crate::worker::traits::message::{MessageParser, ParsedMessage};
use omniqueue::Delivery;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinSet;
use tokio::time::sleep;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn, Instrument, Span};
use uuid::Uuid;

#[derive(Clone)]
pub struct EventWorker {
    config: Arc<Config>,
    queue_type: QueueType,
    cancellation_token: CancellationToken,
}

const QUEUE_GET_MESSAGE_WAIT_TIMEOUT_SECS: Duration = Duration::from_secs(30);
const QUEUE_NO_MESSAGE_SLEEP_DURATION: Duration = Duration::from_millis(1000);
const QUEUE_ERROR_SLEEP_DURATION: Duration = Duration::from_secs(1);

impl EventWorker {
    /// new - Create a new EventWorker consuming `queue_type`
    /// # Arguments
    /// * `queue_type` - The queue this worker consumes
    /// * `config` - The configuration for the EventWorker
    /// * `cancellation_token` - Token for coordinated shutdown
    pub fn new(queue_type: QueueType, config: Arc<Config>, cancellation_token: CancellationToken) -> Self {
        Self { queue_type, config, cancellation_token }
    }

    /// Triggers a graceful shutdown
    pub async fn shutdown(&self) -> EventSystemResult<()> {
        info!("Triggering shutdown for {} worker", self.queue_type);
        self.cancellation_token.cancel();
        Ok(())
    }

    pub fn is_shutdown_requested(&self) -> bool {
        self.cancellation_token.is_cancelled()
    }

    /// Create a single span for the entire message processing
    fn create_job_span(&self, parsed_message: &ParsedMessage) -> Span {
        let correlation_id = Uuid::new_v4();
        match parsed_message {
            ParsedMessage::WorkerInvocation(msg) => tracing::info_span!(
                "job_processing",
                job_id = %msg.invocation.job_id,
                queue = %self.queue_type,
                correlation_id = %correlation_id,
                span_type = "Job",
                status = tracing::field::Empty
            ),
            ParsedMessage::StorageEvent(msg) => tracing::info_span!(
                "storage_event",
                records = msg.events.len(),
                queue = %self.queue_type,
                correlation_id = %correlation_id,
                span_type = "Ingress"
            ),
        }
    }

    /// get_message - Get the next message from the queue
    /// This function blocks until a message is available (with a timeout) or an error occurs
    /// # Returns
    /// * `Ok(None)` - The queue stayed empty for the whole wait
    pub async fn get_message(&self) -> EventSystemResult<Option<Delivery>> {
        let start = Instant::now();

        loop {
            match self.config.queue().consume_message_from_queue(self.queue_type.clone()).await {
                Ok(delivery) => return Ok(Some(delivery)),
                Err(QueueError::ErrorFromQueueError(omniqueue::QueueError::NoData)) => {
                    if start.elapsed() > QUEUE_GET_MESSAGE_WAIT_TIMEOUT_SECS || self.is_shutdown_requested() {
                        return Ok(None);
                    }
                    sleep(QUEUE_NO_MESSAGE_SLEEP_DURATION).await;
                }
                Err(e) => {
                    error!(queue = %self.queue_type, error = %e, "Failed to consume message from queue");
                    return Err(ConsumptionError::FailedToConsumeFromQueue { error_msg: e.to_string() })?;
                }
            }
        }
    }

    /// parse_message - Parse the message received from the queue according to the queue it came from
    fn parse_message(&self, message: &Delivery) -> EventSystemResult<ParsedMessage> {
        match self.queue_type {
            QueueType::TranslationJobProcessing => {
                WorkerInvocationMessage::parse_message(message).map(ParsedMessage::WorkerInvocation)
            }
            QueueType::StorageEvent => StorageEventMessage::parse_message(message).map(ParsedMessage::StorageEvent),
        }
    }

    /// handle_message - Run the handler for a parsed message
    /// # Errors
    /// * Returns an EventSystemError naming the job or storage key that could not be handled
    pub async fn handle_message(&self, message: &ParsedMessage) -> EventSystemResult<()> {
        match message {
            ParsedMessage::WorkerInvocation(msg) => {
                let job_id = msg.invocation.job_id;
                JobHandlerService::process_invocation(msg.invocation.clone(), self.config.clone())
                    .await
                    .map_err(|e| ConsumptionError::FailedToHandleJob { job_id, error_msg: e.to_string() })?;
            }
            ParsedMessage::StorageEvent(msg) => {
                let mut failure = None;
                for event in msg.events.iter() {
                    if let Err(e) = JobHandlerService::handle_storage_event(event.clone(), self.config.clone()).await {
                        error!(key = %event.key, error = %e, "Failed to handle storage event");
                        failure = Some(ConsumptionError::FailedToHandleStorageEvent {
                            key: event.key.clone(),
                            error_msg: e.to_string(),
                        });
                    }
                }
                if let Some(failure) = failure {
                    return Err(failure.into());
                }
            }
        }
        Ok(())
    }

    /// post_processing - Acknowledge the message after handling
    ///
    /// Messages are acknowledged whatever the outcome. Handler failures are recorded in the ledger.
    async fn post_processing(&self, result: EventSystemResult<()>, message: Delivery) -> EventSystemResult<()> {
        message.ack().await.map_err(|e| ConsumptionError::FailedToAcknowledgeMessage(e.0.to_string()))?;
        result
    }

    /// process_message - Handle and acknowledge a message inside its own span
    async fn process_message(&self, message: Delivery, parsed_message: ParsedMessage) -> EventSystemResult<()> {
        let span = self.create_job_span(&parsed_message);
        async move {
            let result = self.handle_message(&parsed_message).await;
            self.post_processing(result, message).await
        }
        .instrument(span)
        .await
    }

    /// Drops a message that cannot be parsed.
    async fn discard_message(&self, message: Delivery) {
        if let Err(e) = message.ack().await {
            error!(queue = %self.queue_type, error = ?e.0, "Failed to acknowledge unparseable message");
        }
    }

    /// run - Run the event worker, by closely monitoring the queue and processing messages
    /// At most `max_concurrent_jobs` messages are handled at once.
    /// Returns once shutdown is requested and every in-flight message has been handled.
    pub async fn run(&self) -> EventSystemResult<()> {
        let mut tasks = JoinSet::new();
        let max_concurrent_tasks = self.config.service_config().max_concurrent_jobs.max(1);
        info!("Starting {} worker (pool_size={})", self.queue_type, max_concurrent_tasks);

        loop {
            if self.is_shutdown_requested() {
                info!("Shutdown requested, stopping message processing");
                break;
            }

            tokio::select! {
                biased;

                Some(result) = tasks.join_next(), if !tasks.is_empty() => {
                    Self::handle_task_result(result);
                }

                _ = self.cancellation_token.cancelled() => {
                    info!("Shutdown signal received, breaking from main loop");
                    break;
                }

                message_result = self.get_message(), if tasks.len() < max_concurrent_tasks => {
                    match message_result {
                        Ok(Some(message)) => match self.parse_message(&message) {
                            Ok(parsed_message) => {
                                debug!(queue = %self.queue_type, "Received message from queue");
                                let worker = self.clone();
                                tasks.spawn(async move { worker.process_message(message, parsed_message).await });
                            }
                            Err(e) => {
                                warn!(queue = %self.queue_type, error = %e, "Dropping unparseable message");
                                self.discard_message(message).await;
                            }
                        },
                        Ok(None) => {}
                        Err(e) => {
                            error!("Error receiving message: {:?}", e);
                            sleep(QUEUE_ERROR_SLEEP_DURATION).await;
                        }
                    }
                }
            }
        }

        info!("Waiting for {} remaining tasks to complete", tasks.len());
        while let Some(result) = tasks.join_next().await {
            Self::handle_task_result(result);
        }
        info!("All tasks completed, worker shutdown complete");

        Ok(())
    }

    /// Handle the result of a task
    fn handle_task_result(result: Result<EventSystemResult<()>, tokio::task::JoinError>) {
        match result {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => {
                error!("Task failed with application error: {:?}", e);
            }
            Err(e) => {
                error!("Task panicked or was cancelled: {:?}", e);
            }
        }
    }
}
