//! Common test utilities for integration tests.

pub mod mocks;

#[allow(unused_imports)]
pub use mocks::*;

use std::time::Duration;

use sse_notify::{Event, NotifyConfig};
use tokio::sync::mpsc;

/// Config with a short initial wait so reconnect tests stay fast.
pub fn fast_config(reconnect: bool) -> NotifyConfig {
    NotifyConfig::default()
        .with_reconnect(reconnect)
        .with_initial_wait(Duration::from_millis(10))
}

/// Drains a receiver whose sender has been dropped.
#[allow(dead_code)]
pub async fn drain(mut rx: mpsc::Receiver<Event>) -> Vec<Event> {
    let mut events = Vec::new();
    while let Some(event) = rx.recv().await {
        events.push(event);
    }
    events
}
