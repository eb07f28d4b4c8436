use crate::error::event::EventSystemResult;
use crate::worker::parser::storage_event_message::StorageEventMessage;
use crate::worker::parser::worker_invocation_message::WorkerInvocationMessage;
use omniqueue::Delivery;

#[derive(Debug, Clone)]
pub enum ParsedMessage {
    WorkerInvocation(Box<WorkerInvocationMessage>),
    StorageEvent(Box<StorageEventMessage>),
}

/// MessageParser - Trait to parse the message from the queue
/// This trait is used to parse the message from the queue
/// and convert it into the required format for the worker
pub trait MessageParser: Send + Sync {
    fn parse_message(message: &Delivery) -> EventSystemResult<Box<Self>>;
}
