//! Delivery side of the outbox.

use async_trait::async_trait;
use thiserror::Error;
use tracing::info;

use crate::domain::entities::OutboxEvent;

/// Delivery failed; the event stays pending and is retried on a later tick.
#[derive(Debug, Error)]
#[error("failed to deliver event {event_id}: {reason}")]
pub struct DeliveryError {
    pub event_id: i64,
    pub reason: String,
}

/// Sink that receives outbox events from the poller.
///
/// Delivery may be repeated for the same event if acknowledging it in the
/// store fails afterwards, so sinks should deduplicate on
/// [`OutboxEvent::id`] when that matters.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventSender: Send + Sync {
    /// Delivers one event.
    ///
    /// # Errors
    ///
    /// Returns [`DeliveryError`] when the sink did not accept the event.
    async fn send(&self, event: &OutboxEvent) -> Result<(), DeliveryError>;
}

/// Sender that publishes events to the structured log.
///
/// Stands in for a message-bus publisher and never fails.
#[derive(Debug, Default, Clone)]
pub struct LogEventSender;

impl LogEventSender {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EventSender for LogEventSender {
    async fn send(&self, event: &OutboxEvent) -> Result<(), DeliveryError> {
        info!(
            event_id = event.id,
            event_type = %event.event_type,
            payload = %event.payload,
            "sending event"
        );
        Ok(())
    }
}
