//! Mock implementations for testing.
//!
//! - [`MockHttpClient`] - scripted per-attempt responses, request recording
//! - [`RecordingSink`] - collects delivered events, can hang up after N

pub mod http;
pub mod sink;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use sink::RecordingSink;
