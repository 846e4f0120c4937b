//! Mock HTTP client for testing.
//!
//! Responses are scripted per connection attempt and consumed in order, so
//! a test can describe "first attempt streams these chunks, second attempt
//! answers 204" and then inspect the headers each attempt sent.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::sse::EVENT_STREAM_MEDIA_TYPE;
use crate::traits::{Headers, HttpClient, HttpError, StreamResponse};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
}

impl RecordedRequest {
    /// Look up a request header by name, ignoring ASCII case.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Configuration for one mock connection attempt.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Respond with status, headers, and body chunks, then end the body
    Stream {
        status: u16,
        headers: Headers,
        chunks: Vec<Result<Bytes, HttpError>>,
    },
    /// Fail the request itself
    Error(HttpError),
}

impl MockResponse {
    /// A `200 OK` event stream delivering `body` in a single chunk.
    pub fn event_stream(body: &str) -> Self {
        Self::event_stream_chunks(vec![Ok(Bytes::from(body.to_string()))])
    }

    /// A `200 OK` event stream delivering the given chunks.
    pub fn event_stream_chunks(chunks: Vec<Result<Bytes, HttpError>>) -> Self {
        let mut headers = Headers::new();
        headers.insert(
            "Content-Type".to_string(),
            EVENT_STREAM_MEDIA_TYPE.to_string(),
        );
        MockResponse::Stream {
            status: 200,
            headers,
            chunks,
        }
    }

    /// An empty response with the given status and no content type.
    pub fn status(status: u16) -> Self {
        MockResponse::Stream {
            status,
            headers: Headers::new(),
            chunks: Vec::new(),
        }
    }

    /// A `200 OK` response with the given content type and empty body.
    pub fn content_type(content_type: &str) -> Self {
        let mut headers = Headers::new();
        headers.insert("Content-Type".to_string(), content_type.to_string());
        MockResponse::Stream {
            status: 200,
            headers,
            chunks: Vec::new(),
        }
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use sse_notify::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.push_response(MockResponse::event_stream("data: hi\n\n"));
/// client.push_response(MockResponse::status(204));
///
/// // ... run a subscription ...
///
/// let requests = client.get_requests();
/// assert_eq!(requests.len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Scripted responses, one per attempt
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next unanswered attempt.
    pub fn push_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of scripted responses not yet consumed.
    pub fn remaining(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    fn record_request(&self, url: &str, headers: &Headers) {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
        });
    }
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn get_stream(&self, url: &str, headers: &Headers) -> Result<StreamResponse, HttpError> {
        self.record_request(url, headers);

        let next = self.responses.lock().unwrap().pop_front();
        match next {
            Some(MockResponse::Stream {
                status,
                headers,
                chunks,
            }) => {
                let body = futures::stream::iter(chunks);
                Ok(StreamResponse::new(status, headers, Box::pin(body)))
            }
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::ConnectionFailed(format!(
                "No mock response for URL: {}",
                url
            ))),
        }
    }
}
