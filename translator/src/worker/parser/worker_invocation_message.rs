use crate::error::event::EventSystemResult;
use crate::error::ConsumptionError;
use crate::types::jobs::requests::WorkerInvocation;
use crate::worker::parser::payload;
use crate::worker::traits::message::MessageParser;
use color_eyre::eyre::Context;
use omniqueue::Delivery;

#[derive(Debug, Clone)]
pub struct WorkerInvocationMessage {
    pub invocation: WorkerInvocation,
}

impl WorkerInvocationMessage {
    pub fn from_payload(payload: &[u8]) -> EventSystemResult<Self> {
        let invocation = serde_json::from_slice::<WorkerInvocation>(payload)
            .wrap_err("Failed to parse worker invocation from message")
            .map_err(|e| ConsumptionError::MessageParsingError(format!("{:#}", e)))?;
        Ok(Self { invocation })
    }
}

impl MessageParser for WorkerInvocationMessage {
    fn parse_message(message: &Delivery) -> EventSystemResult<Box<Self>> {
        Ok(Box::new(Self::from_payload(payload(message)?)?))
    }
}
