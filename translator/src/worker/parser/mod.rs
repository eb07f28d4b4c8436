pub mod storage_event_message;
pub mod worker_invocation_message;

use crate::error::event::EventSystemResult;
use crate::error::ConsumptionError;
use omniqueue::Delivery;

pub(crate) fn payload(message: &Delivery) -> EventSystemResult<&[u8]> {
    Ok(message.borrow_payload().ok_or_else(|| ConsumptionError::MessageParsingError("Empty payload".to_string()))?)
}
