//! Error category classification.
//!
//! Categories decide whether the reconnect loop may absorb an error or
//! must surface it to the caller.

use std::fmt;

/// High-level categorization of subscription errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Missing or closed delivery sink. Fails before any network activity.
    Configuration,

    /// Transport failure while establishing the request.
    /// Never retried: reconnection targets stream interruption only.
    Connection,

    /// The origin answered, but not with an event stream
    /// (bad status or content type).
    Protocol,

    /// The body failed mid-read. Absorbed by the reconnect loop when
    /// reconnection is enabled.
    Stream,
}

impl ErrorCategory {
    /// Returns true if the reconnect loop treats this category as a
    /// trigger for another attempt rather than a terminal error.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCategory::Stream)
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "configuration",
            ErrorCategory::Connection => "connection",
            ErrorCategory::Protocol => "protocol",
            ErrorCategory::Stream => "stream",
        }
    }

    /// Returns suggested recovery actions for this category.
    pub fn recovery_hint(&self) -> &'static str {
        match self {
            ErrorCategory::Configuration => "Keep the event receiver alive while subscribing",
            ErrorCategory::Connection => "Check that the endpoint is reachable and try again",
            ErrorCategory::Protocol => {
                "Check that the URL points at a text/event-stream endpoint"
            }
            ErrorCategory::Stream => "Enable reconnection to resume after interruptions",
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_retryable() {
        assert!(ErrorCategory::Stream.is_retryable());
        assert!(!ErrorCategory::Connection.is_retryable());
        assert!(!ErrorCategory::Protocol.is_retryable());
        assert!(!ErrorCategory::Configuration.is_retryable());
    }

    #[test]
    fn test_category_as_str() {
        assert_eq!(ErrorCategory::Configuration.as_str(), "configuration");
        assert_eq!(ErrorCategory::Connection.as_str(), "connection");
        assert_eq!(ErrorCategory::Protocol.as_str(), "protocol");
        assert_eq!(ErrorCategory::Stream.as_str(), "stream");
    }

    #[test]
    fn test_category_display() {
        assert_eq!(format!("{}", ErrorCategory::Protocol), "protocol");
    }

    #[test]
    fn test_category_recovery_hint() {
        assert!(ErrorCategory::Protocol
            .recovery_hint()
            .contains("text/event-stream"));
        assert!(ErrorCategory::Stream.recovery_hint().contains("reconnection"));
    }
}
