use crate::error::event::EventSystemResult;
use crate::error::ConsumptionError;
use crate::types::jobs::requests::StorageEvent;
use crate::worker::parser::payload;
use crate::worker::traits::message::MessageParser;
use color_eyre::eyre::Context;
use omniqueue::Delivery;
use serde::Deserialize;

/// Bucket notification as delivered to the storage event queue.
/// A notification carries zero or more records; the setup test event carries none.
#[derive(Debug, Deserialize)]
struct Notification {
    #[serde(rename = "Records", default)]
    records: Vec<NotificationRecord>,
}

#[derive(Debug, Deserialize)]
struct NotificationRecord {
    #[serde(rename = "eventName")]
    event_name: String,
    s3: S3Entity,
}

#[derive(Debug, Deserialize)]
struct S3Entity {
    bucket: S3Bucket,
    object: S3Object,
}

#[derive(Debug, Deserialize)]
struct S3Bucket {
    name: String,
}

#[derive(Debug, Deserialize)]
struct S3Object {
    key: String,
}

#[derive(Debug, Clone)]
pub struct StorageEventMessage {
    pub events: Vec<StorageEvent>,
}

impl StorageEventMessage {
    pub fn from_payload(payload: &[u8]) -> EventSystemResult<Self> {
        let notification = serde_json::from_slice::<Notification>(payload)
            .wrap_err("Failed to parse storage notification from message")
            .map_err(|e| ConsumptionError::MessageParsingError(format!("{:#}", e)))?;

        let events = notification
            .records
            .into_iter()
            .map(|record| StorageEvent {
                bucket: record.s3.bucket.name,
                key: record.s3.object.key,
                event_name: record.event_name,
            })
            .collect();
        Ok(Self { events })
    }
}

impl MessageParser for StorageEventMessage {
    fn parse_message(message: &Delivery) -> EventSystemResult<Box<Self>> {
        Ok(Box::new(Self::from_payload(payload(message)?)?))
    }
}
