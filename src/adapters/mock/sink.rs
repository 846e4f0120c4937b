//! Event sink that records deliveries.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use crate::sse::Event;
use crate::traits::{EventSink, SinkClosed};

#[derive(Debug, Default)]
struct Inner {
    events: Vec<Event>,
    /// Accept at most this many events, then behave as closed
    limit: Option<usize>,
    closed: bool,
}

/// Collects delivered events in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    inner: Arc<Mutex<Inner>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink whose consumer hangs up after accepting `limit` events.
    pub fn closing_after(limit: usize) -> Self {
        let sink = Self::default();
        sink.inner.lock().unwrap().limit = Some(limit);
        sink
    }

    /// Simulate the consumer going away.
    pub fn close(&self) {
        self.inner.lock().unwrap().closed = true;
    }

    /// Events delivered so far, in order.
    pub fn events(&self) -> Vec<Event> {
        self.inner.lock().unwrap().events.clone()
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn deliver(&self, event: Event) -> Result<(), SinkClosed> {
        let mut inner = self.inner.lock().unwrap();
        if inner.closed {
            return Err(SinkClosed);
        }
        inner.events.push(event);
        if inner.limit.is_some_and(|limit| inner.events.len() >= limit) {
            inner.closed = true;
        }
        Ok(())
    }

    fn is_closed(&self) -> bool {
        self.inner.lock().unwrap().closed
    }
}
