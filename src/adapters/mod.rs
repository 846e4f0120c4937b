//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP client using reqwest
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - Scripted per-attempt responses
//! - [`mock::RecordingSink`] - In-memory event sink

pub mod mock;
pub mod reqwest_http;

pub use mock::{MockHttpClient, RecordingSink};
pub use reqwest_http::ReqwestHttpClient;
