//! sse-notify - resumable Server-Sent Events client
//!
//! A [`Decoder`](sse::Decoder) turns a `text/event-stream` body into
//! [`Event`](sse::Event)s; a [`Connector`](connector::Connector) wraps it in
//! a reconnect loop that honours `retry` and resumes with `Last-Event-ID`.
//!
//! ```ignore
//! use sse_notify::{Connector, NotifyConfig, Subscription};
//!
//! let connector = Connector::from_config(NotifyConfig::default())?;
//! let mut subscription = Subscription::spawn(connector, "https://example.com/events");
//! while let Some(event) = subscription.recv().await {
//!     println!("{}", event.data_lossy());
//! }
//! ```

pub mod adapters;
pub mod cancel;
pub mod cli;
pub mod config;
pub mod connector;
pub mod error;
pub mod sse;
pub mod traits;

pub use cancel::{cancel_pair, CancelHandle, CancelToken};
pub use config::NotifyConfig;
pub use connector::{notify, Connector, Finished, Subscription};
pub use error::{NotifyError, NotifyResult};
pub use sse::{Decoder, Event, SessionState};
