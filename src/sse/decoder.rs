//! Incremental event-stream decoder.
//!
//! [`Decoder`] turns arbitrarily split byte chunks into complete [`Event`]s.
//! It owns the [`SessionState`] for the duration of one connection and hands
//! it back through [`Decoder::finish`], so `id` and `retry` values survive
//! into the next attempt.
//!
//! [`decode`] drives a decoder over a response body and delivers each event
//! to a sink as soon as it is dispatched.

use std::mem;
use std::time::Duration;

use bytes::{Bytes, BytesMut};
use futures::Stream;
use futures_util::StreamExt;
use tracing::debug;

use super::event::{Event, SessionState};
use super::line::{parse_line, FieldName, SseLine};
use crate::error::NotifyError;
use crate::traits::{EventSink, HttpError};

/// Fields of an event that has not been dispatched yet.
#[derive(Debug, Default)]
struct PartialEvent {
    event_type: String,
    data: BytesMut,
}

impl PartialEvent {
    fn into_event(mut self, origin: &str, id: &str) -> Event {
        // every data value was appended with a trailing '\n'
        if !self.data.is_empty() {
            self.data.truncate(self.data.len() - 1);
        }
        Event {
            origin: origin.to_string(),
            id: id.to_string(),
            event_type: self.event_type,
            data: self.data.freeze(),
        }
    }
}

/// Whether an event is being assembled.
#[derive(Debug, Default)]
enum Pending {
    #[default]
    Idle,
    Assembling(PartialEvent),
}

impl Pending {
    /// Apply `f` to the event under assembly, starting one if idle.
    fn update(&mut self, f: impl FnOnce(&mut PartialEvent)) {
        let mut partial = match mem::take(self) {
            Pending::Assembling(partial) => partial,
            Pending::Idle => PartialEvent::default(),
        };
        f(&mut partial);
        *self = Pending::Assembling(partial);
    }
}

/// Stateful line decoder for one connection.
#[derive(Debug)]
pub struct Decoder {
    origin: String,
    state: SessionState,
    pending: Pending,
    /// Bytes after the last `\n` seen so far
    buffer: BytesMut,
    /// Prefix of `buffer` already searched for `\n`
    scanned: usize,
}

impl Decoder {
    /// Create a decoder stamping events with `origin`, resuming `state`.
    pub fn new(origin: impl Into<String>, state: SessionState) -> Self {
        Self {
            origin: origin.into(),
            state,
            pending: Pending::Idle,
            buffer: BytesMut::new(),
            scanned: 0,
        }
    }

    /// Session state as updated by the lines decoded so far.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Whether fields of an undispatched event are held.
    pub fn is_assembling(&self) -> bool {
        matches!(self.pending, Pending::Assembling(_))
    }

    /// Process one line without its `\n` terminator.
    ///
    /// Returns the dispatched event when `line` is a blank line ending an
    /// event under assembly.
    pub fn feed_line(&mut self, line: &[u8]) -> Option<Event> {
        match parse_line(line) {
            SseLine::Blank => match mem::take(&mut self.pending) {
                Pending::Idle => None,
                Pending::Assembling(partial) => {
                    debug!("received new event");
                    Some(partial.into_event(&self.origin, &self.state.last_event_id))
                }
            },
            SseLine::Comment => {
                debug!("comment, ignoring");
                None
            }
            SseLine::Field { name, value } => {
                debug!("received line of length {}", line.len());
                self.apply_field(name, value);
                None
            }
        }
    }

    fn apply_field(&mut self, name: FieldName, value: &[u8]) {
        match name {
            FieldName::Event => {
                let event_type = String::from_utf8_lossy(value).into_owned();
                self.pending.update(|partial| partial.event_type = event_type);
            }
            FieldName::Data => {
                self.pending.update(|partial| {
                    partial.data.extend_from_slice(value);
                    partial.data.extend_from_slice(b"\n");
                });
            }
            FieldName::Id => {
                self.state.last_event_id = String::from_utf8_lossy(value).into_owned();
            }
            FieldName::Retry => match parse_retry(value) {
                Some(wait) => self.state.reconnect_wait = wait,
                None => debug!(
                    "failed to parse retry field as unsigned integer: {:?}, ignoring",
                    String::from_utf8_lossy(value)
                ),
            },
            FieldName::Unknown => {}
        }
    }

    /// Append a chunk of the body without decoding it yet.
    pub fn push(&mut self, chunk: &[u8]) {
        self.buffer.extend_from_slice(chunk);
    }

    /// Decode buffered complete lines until one dispatches an event.
    ///
    /// Returns `None` once only an unterminated line (or nothing) is left.
    pub fn next_event(&mut self) -> Option<Event> {
        loop {
            let Some(offset) = self.buffer[self.scanned..].iter().position(|&b| b == b'\n') else {
                self.scanned = self.buffer.len();
                return None;
            };
            let pos = self.scanned + offset;
            let line = self.buffer.split_to(pos + 1);
            self.scanned = 0;
            if let Some(event) = self.feed_line(&line[..pos]) {
                return Some(event);
            }
        }
    }

    /// Push `chunk` and lazily yield the events it completes, in order.
    pub fn feed<'a>(&'a mut self, chunk: &[u8]) -> impl Iterator<Item = Event> + 'a {
        self.push(chunk);
        std::iter::from_fn(move || self.next_event())
    }

    /// End of input: drop any undispatched event and unterminated line,
    /// returning the session state to carry into the next attempt.
    pub fn finish(self) -> SessionState {
        if self.is_assembling() || !self.buffer.is_empty() {
            debug!(
                "stream ended mid-event, dropping {} buffered bytes",
                self.buffer.len()
            );
        }
        self.state
    }
}

/// A `retry` value is accepted only if it is all ASCII digits and fits u64.
fn parse_retry(value: &[u8]) -> Option<Duration> {
    if value.is_empty() || !value.iter().all(u8::is_ascii_digit) {
        return None;
    }
    std::str::from_utf8(value)
        .ok()?
        .parse::<u64>()
        .ok()
        .map(Duration::from_millis)
}

/// Decode `body` until it ends, delivering each event to `sink`.
///
/// Always returns the updated session state. The result is `Ok` on a clean
/// end of stream, and also when the consumer hung up (nothing is left to
/// deliver to). A failing body read yields [`NotifyError::StreamRead`].
pub async fn decode<S, K>(
    mut body: S,
    origin: &str,
    state: SessionState,
    sink: &K,
) -> (SessionState, Result<(), NotifyError>)
where
    S: Stream<Item = Result<Bytes, HttpError>> + Unpin,
    K: EventSink + ?Sized,
{
    let mut decoder = Decoder::new(origin, state);

    while let Some(chunk) = body.next().await {
        let chunk = match chunk {
            Ok(chunk) => chunk,
            Err(source) => {
                let err = NotifyError::StreamRead {
                    uri: origin.to_string(),
                    source,
                };
                return (decoder.finish(), Err(err));
            }
        };

        let mut hung_up = false;
        for event in decoder.feed(&chunk) {
            if sink.deliver(event).await.is_err() {
                hung_up = true;
                break;
            }
        }
        if hung_up {
            debug!("event sink closed, stopping decode");
            break;
        }
    }

    (decoder.finish(), Ok(()))
}
