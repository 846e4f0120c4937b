//! Delivery sink trait abstraction.
//!
//! The connector is the single producer. `deliver` blocks until the
//! consumer side accepts the event, so a slow consumer slows the stream
//! down instead of losing events.

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::sse::Event;

/// The consumer side of a sink has gone away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("event sink closed")]
pub struct SinkClosed;

/// Ordered, blocking hand-off of events to the caller.
#[async_trait]
pub trait EventSink: Send + Sync {
    /// Hand one event over, waiting until it is accepted.
    async fn deliver(&self, event: Event) -> Result<(), SinkClosed>;

    /// Whether no consumer can receive events any more.
    fn is_closed(&self) -> bool;
}

/// A bounded tokio channel is the default sink. Its capacity bounds how
/// far the connector may run ahead of the consumer. Several consumers can
/// share the receiver behind a mutex.
#[async_trait]
impl EventSink for mpsc::Sender<Event> {
    async fn deliver(&self, event: Event) -> Result<(), SinkClosed> {
        self.send(event).await.map_err(|_| SinkClosed)
    }

    fn is_closed(&self) -> bool {
        mpsc::Sender::is_closed(self)
    }
}
