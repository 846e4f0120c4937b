//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - streaming GET used to open each connection attempt
//! - [`EventSink`] - ordered, blocking delivery of decoded events

pub mod http;
pub mod sink;

pub use http::{ByteStream, Headers, HttpClient, HttpError, StreamResponse};
pub use sink::{EventSink, SinkClosed};
