//! Mock server fixtures for integration tests.
//!
//! Wraps `wiremock` so tests can describe each connection attempt as a
//! canned event-stream response.

use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const EVENTS_PATH: &str = "/events";

/// A `200 OK` response carrying `body` as `text/event-stream`.
pub fn event_stream(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.as_bytes().to_vec(), "text/event-stream")
}

/// Builder for a mock origin serving `/events`.
pub struct MockOrigin {
    server: MockServer,
}

impl MockOrigin {
    /// Starts a new mock origin on a random local port.
    pub async fn start() -> Self {
        Self {
            server: MockServer::start().await,
        }
    }

    /// Answers exactly one attempt with `response`.
    pub async fn once(self, response: ResponseTemplate) -> Self {
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .respond_with(response)
            .up_to_n_times(1)
            .expect(1)
            .mount(&self.server)
            .await;
        self
    }

    /// Answers attempts resuming from `last_event_id` with `response`.
    pub async fn resuming_from(self, last_event_id: &str, response: ResponseTemplate) -> Self {
        Mock::given(method("GET"))
            .and(path(EVENTS_PATH))
            .and(header("Last-Event-ID", last_event_id))
            .respond_with(response)
            .up_to_n_times(1)
            .expect(1)
            .mount(&self.server)
            .await;
        self
    }

    /// The subscribed URL.
    pub fn url(&self) -> String {
        format!("{}{}", self.server.uri(), EVENTS_PATH)
    }

    pub fn server(&self) -> &MockServer {
        &self.server
    }
}
