//! Event and session types shared by the decoder and the connector.

use std::time::Duration;

use bytes::Bytes;

/// Reconnection wait used until the server sends a `retry` field.
pub const DEFAULT_RECONNECT_WAIT: Duration = Duration::from_millis(1000);

/// A dispatched server-sent event.
///
/// Events are immutable once delivered. `id` carries the session's
/// resumption marker at the moment of dispatch, which may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Event {
    /// The stream this event came from (the subscribed URI)
    pub origin: String,
    /// Last event id seen on the session when this event was dispatched
    pub id: String,
    /// Value of the `event` field, empty when the server sent none
    pub event_type: String,
    /// Concatenated `data` values joined by `\n`
    pub data: Bytes,
}

impl Event {
    /// Payload as text, replacing invalid UTF-8 sequences.
    pub fn data_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Whether the server named this event with an `event` field.
    pub fn has_type(&self) -> bool {
        !self.event_type.is_empty()
    }
}

/// Resumable per-subscription state carried across reconnects.
///
/// Neither field is ever reset implicitly; only `id` and `retry` fields
/// in the stream change them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Most recently observed `id` field value
    pub last_event_id: String,
    /// Delay before the next connection attempt
    pub reconnect_wait: Duration,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            last_event_id: String::new(),
            reconnect_wait: DEFAULT_RECONNECT_WAIT,
        }
    }
}

impl SessionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from a custom reconnection wait.
    pub fn with_reconnect_wait(mut self, wait: Duration) -> Self {
        self.reconnect_wait = wait;
        self
    }

    /// Resume from a previously seen event id.
    pub fn with_last_event_id(mut self, id: impl Into<String>) -> Self {
        self.last_event_id = id.into();
        self
    }

    /// Whether a resumption marker should be sent on the next request.
    pub fn has_last_event_id(&self) -> bool {
        !self.last_event_id.is_empty()
    }
}
