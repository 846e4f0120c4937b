//! Terminal error returned by a subscription.

use thiserror::Error;

use super::category::ErrorCategory;
use crate::traits::HttpError;

/// The single error a subscription surfaces to its caller.
///
/// Per-line anomalies (malformed `retry`, unknown fields) never reach
/// this type; the decoder recovers from them locally.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// The delivery sink was closed before the subscription started.
    #[error("nil channel given: event sink is closed")]
    SinkClosed,

    /// The request could not be performed.
    #[error("error performing request for {uri}: {source}")]
    Request {
        uri: String,
        #[source]
        source: HttpError,
    },

    /// The origin answered with something other than `200 OK`.
    #[error("{uri} returned unexpected status: {status}")]
    UnexpectedStatus { uri: String, status: u16 },

    /// The origin answered with a non event-stream body.
    #[error("{uri} returned unexpected Content-Type: {content_type}")]
    UnexpectedContentType { uri: String, content_type: String },

    /// Reading the body failed mid-stream.
    #[error("error reading stream from {uri}: {source}")]
    StreamRead {
        uri: String,
        #[source]
        source: HttpError,
    },
}

impl NotifyError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            NotifyError::SinkClosed => ErrorCategory::Configuration,
            NotifyError::Request { .. } => ErrorCategory::Connection,
            NotifyError::UnexpectedStatus { .. } | NotifyError::UnexpectedContentType { .. } => {
                ErrorCategory::Protocol
            }
            NotifyError::StreamRead { .. } => ErrorCategory::Stream,
        }
    }

    /// Whether this error aborts the subscription even with reconnection on.
    pub fn is_fatal(&self) -> bool {
        !self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            NotifyError::SinkClosed => "SINK_CLOSED",
            NotifyError::Request { .. } => "REQUEST_FAILED",
            NotifyError::UnexpectedStatus { .. } => "UNEXPECTED_STATUS",
            NotifyError::UnexpectedContentType { .. } => "UNEXPECTED_CONTENT_TYPE",
            NotifyError::StreamRead { .. } => "STREAM_READ",
        }
    }

    /// The offending HTTP status, if this is a status error.
    pub fn status(&self) -> Option<u16> {
        match self {
            NotifyError::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The subscribed URI this error refers to, if any.
    pub fn uri(&self) -> Option<&str> {
        match self {
            NotifyError::SinkClosed => None,
            NotifyError::Request { uri, .. }
            | NotifyError::UnexpectedStatus { uri, .. }
            | NotifyError::UnexpectedContentType { uri, .. }
            | NotifyError::StreamRead { uri, .. } => Some(uri),
        }
    }
}
