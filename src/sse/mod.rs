//! Server-Sent Events decoding.
//!
//! The event-stream format consists of:
//! - `event: <type>` - names the event
//! - `data: <payload>` - payload line, repeatable
//! - `id: <marker>` - resumption marker, kept across events and reconnects
//! - `retry: <millis>` - reconnection wait
//! - Empty line - dispatches the event
//! - Lines starting with `:` - comments (ignored)
//!
//! # Module structure
//! - `event` - Event and SessionState
//! - `line` - classification of a single line
//! - `decoder` - stateful Decoder and the async `decode` driver

mod decoder;
mod event;
mod line;

pub use decoder::{decode, Decoder};
pub use event::{Event, SessionState, DEFAULT_RECONNECT_WAIT};
pub use line::{parse_line, FieldName, SseLine};

/// Media type a subscription requires from the origin.
pub const EVENT_STREAM_MEDIA_TYPE: &str = "text/event-stream";

/// Request header carrying the resumption marker.
pub const LAST_EVENT_ID_HEADER: &str = "Last-Event-ID";
