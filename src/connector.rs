//! Resumable subscription to an event-stream endpoint.
//!
//! [`Connector::notify`] opens the stream, validates the response, decodes
//! it into the sink and, when reconnection is enabled, waits the
//! server-directed delay and reconnects with the last seen event id.

use std::mem;

use tokio::sync::mpsc;
use tokio::task::{JoinError, JoinHandle};
use tracing::{debug, info, warn};

use crate::adapters::ReqwestHttpClient;
use crate::cancel::{cancel_pair, CancelHandle, CancelToken};
use crate::config::NotifyConfig;
use crate::error::{NotifyError, NotifyResult};
use crate::sse::{decode, Event, SessionState, EVENT_STREAM_MEDIA_TYPE, LAST_EVENT_ID_HEADER};
use crate::traits::{EventSink, Headers, HttpClient, HttpError, StreamResponse};

/// Owns the session state of one logical subscription and drives the
/// reconnect loop.
pub struct Connector<C> {
    client: C,
    config: NotifyConfig,
    state: SessionState,
}

impl Connector<ReqwestHttpClient> {
    /// Create a connector on a reqwest client built from `config`.
    pub fn from_config(config: NotifyConfig) -> Result<Self, HttpError> {
        let client = ReqwestHttpClient::from_config(&config)?;
        Ok(Self::new(client, config))
    }
}

impl<C: HttpClient> Connector<C> {
    /// Create a connector with a fresh session.
    pub fn new(client: C, config: NotifyConfig) -> Self {
        let state = SessionState::default().with_reconnect_wait(config.initial_wait);
        Self {
            client,
            config,
            state,
        }
    }

    /// Resume a previous session instead of starting fresh.
    pub fn with_state(mut self, state: SessionState) -> Self {
        self.state = state;
        self
    }

    /// Session state as left by the last decode pass.
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Headers for the next attempt.
    fn request_headers(&self) -> Headers {
        let mut headers = self.config.extra_headers.clone();
        headers.retain(|name, _| {
            !name.eq_ignore_ascii_case("Accept") && !name.eq_ignore_ascii_case(LAST_EVENT_ID_HEADER)
        });
        if self.state.has_last_event_id() {
            headers.insert(
                LAST_EVENT_ID_HEADER.to_string(),
                self.state.last_event_id.clone(),
            );
        }
        headers.insert("Accept".to_string(), EVENT_STREAM_MEDIA_TYPE.to_string());
        headers
    }

    /// Issue one request and validate that it is an event stream.
    async fn connect(&self, uri: &str) -> NotifyResult<StreamResponse> {
        let headers = self.request_headers();
        let response = self
            .client
            .get_stream(uri, &headers)
            .await
            .map_err(|source| NotifyError::Request {
                uri: uri.to_string(),
                source,
            })?;

        if response.status != 200 {
            return Err(NotifyError::UnexpectedStatus {
                uri: uri.to_string(),
                status: response.status,
            });
        }
        let content_type = response.content_type();
        if !is_event_stream(content_type) {
            return Err(NotifyError::UnexpectedContentType {
                uri: uri.to_string(),
                content_type: content_type.to_string(),
            });
        }
        Ok(response)
    }

    /// Subscribe to `uri`, delivering every event to `sink` in order.
    ///
    /// Returns when the stream ends with reconnection disabled (carrying any
    /// read error), when `cancel` fires between attempts, when the consumer
    /// hangs up, or on a fatal request/validation error. Read errors are
    /// absorbed into the reconnect loop while reconnection is enabled.
    pub async fn notify<K>(&mut self, uri: &str, sink: &K, cancel: &CancelToken) -> NotifyResult<()>
    where
        K: EventSink + ?Sized,
    {
        if sink.is_closed() {
            return Err(NotifyError::SinkClosed);
        }

        loop {
            let response = self.connect(uri).await?;
            info!("connected to {}, reading lines", uri);

            let state = mem::take(&mut self.state);
            let (state, result) = decode(response.body, uri, state, sink).await;
            self.state = state;

            if !self.config.reconnect {
                return result;
            }
            if sink.is_closed() {
                info!("event sink closed, ending subscription to {}", uri);
                return Ok(());
            }
            if let Err(err) = &result {
                warn!("error: {}, reconnecting", err);
            }
            if cancel.is_cancelled() {
                info!("subscription to {} cancelled", uri);
                return Ok(());
            }

            let wait = self.state.reconnect_wait;
            debug!("waiting {:?} before reconnecting to {}", wait, uri);
            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("subscription to {} cancelled", uri);
                    return Ok(());
                }
                _ = tokio::time::sleep(wait) => {}
            }
        }
    }
}

/// Media type comparison ignoring case and parameters such as `charset`.
fn is_event_stream(content_type: &str) -> bool {
    content_type
        .split(';')
        .next()
        .map(str::trim)
        .is_some_and(|media_type| media_type.eq_ignore_ascii_case(EVENT_STREAM_MEDIA_TYPE))
}

/// Subscribe with the default reqwest client until the stream ends
/// (`reconnect == false`) or a fatal error occurs.
pub async fn notify<K>(uri: &str, reconnect: bool, sink: &K) -> NotifyResult<()>
where
    K: EventSink + ?Sized,
{
    let config = NotifyConfig::default().with_reconnect(reconnect);
    let mut connector = Connector::new(ReqwestHttpClient::new(), config);
    connector.notify(uri, sink, &CancelToken::never()).await
}

/// How a spawned subscription ended.
#[derive(Debug)]
pub struct Finished {
    /// Session state to resume from
    pub state: SessionState,
    /// The subscription's terminal result
    pub result: NotifyResult<()>,
}

/// A subscription running as its own tokio task.
///
/// Events arrive on a bounded channel sized by
/// [`NotifyConfig::channel_capacity`]; the task waits for the consumer
/// whenever the channel is full.
pub struct Subscription {
    events: mpsc::Receiver<Event>,
    cancel: CancelHandle,
    task: JoinHandle<Finished>,
}

impl Subscription {
    /// Spawn `connector` on the current tokio runtime.
    pub fn spawn<C>(connector: Connector<C>, uri: impl Into<String>) -> Self
    where
        C: HttpClient + 'static,
    {
        let uri = uri.into();
        let (tx, events) = mpsc::channel(connector.config.channel_capacity.max(1));
        let (cancel, token) = cancel_pair();

        let task = tokio::spawn(async move {
            let mut connector = connector;
            let result = connector.notify(&uri, &tx, &token).await;
            Finished {
                state: connector.state,
                result,
            }
        });

        Self {
            events,
            cancel,
            task,
        }
    }

    /// Receive the next event; `None` once the subscription has ended.
    pub async fn recv(&mut self) -> Option<Event> {
        self.events.recv().await
    }

    /// Stop at the next reconnect boundary.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        self.cancel.clone()
    }

    /// Drop the receiver and wait for the task to finish.
    ///
    /// Events not yet received are discarded and the subscription ends at
    /// the next delivery attempt.
    pub async fn join(self) -> Result<Finished, JoinError> {
        drop(self.events);
        self.task.await
    }
}
