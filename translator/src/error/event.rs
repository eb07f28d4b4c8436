use thiserror::Error;

use crate::error::consumer::ConsumptionError;

pub type EventSystemResult<T> = Result<T, EventSystemError>;

#[derive(Error, Debug)]
pub enum EventSystemError {
    #[error("Consumption error: {0}")]
    ConsumptionError(#[from] ConsumptionError),

    #[error("Mutex poisoned: {0}")]
    MutexPoisonError(String),

    #[error("Worker task failed: {0}")]
    WorkerTaskError(#[from] tokio::task::JoinError),
}
