//! Error handling for subscriptions.
//!
//! | Category | Raised by | Reconnect loop |
//! |----------|-----------|----------------|
//! | Configuration | closed sink before start | fatal |
//! | Connection | request could not be performed | fatal |
//! | Protocol | bad status or content type | fatal |
//! | Stream | body read failure | absorbed when reconnecting |
//!
//! Malformed `retry` values and unknown field names are recovered inside
//! the decoder and never show up here.

mod category;
mod notify_error;

pub use category::ErrorCategory;
pub use notify_error::NotifyError;

/// Result alias used by subscription entry points.
pub type NotifyResult<T> = Result<T, NotifyError>;
