//! Subscription configuration.
//!
//! Use the builder pattern to customize behavior.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use sse_notify::config::NotifyConfig;
//!
//! let config = NotifyConfig::default()
//!     .with_reconnect(false)
//!     .with_initial_wait(Duration::from_millis(500))
//!     .with_header("Authorization", "Bearer token");
//! assert!(!config.reconnect);
//! ```

use std::time::Duration;

use crate::sse::DEFAULT_RECONNECT_WAIT;
use crate::traits::Headers;

/// Environment variable disabling reconnection when set to `0` or `false`.
pub const ENV_RECONNECT: &str = "SSE_NOTIFY_RECONNECT";
/// Environment variable overriding the initial reconnection wait (ms).
pub const ENV_INITIAL_WAIT_MS: &str = "SSE_NOTIFY_INITIAL_WAIT_MS";

/// Configuration for a subscription.
#[derive(Debug, Clone, PartialEq)]
pub struct NotifyConfig {
    /// Reconnect after the stream ends (default: true)
    pub reconnect: bool,
    /// Reconnection wait until the server sends `retry` (default: 1000 ms)
    pub initial_wait: Duration,
    /// Extra request headers. `Accept` and `Last-Event-ID` always win.
    pub extra_headers: Headers,
    /// Capacity of the channel created by `Subscription::spawn` (default: 1)
    pub channel_capacity: usize,
    /// Whole-request timeout applied by the reqwest client (default: none)
    pub request_timeout: Option<Duration>,
    /// Connect timeout applied by the reqwest client (default: none)
    pub connect_timeout: Option<Duration>,
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            reconnect: true,
            initial_wait: DEFAULT_RECONNECT_WAIT,
            extra_headers: Headers::new(),
            channel_capacity: 1,
            request_timeout: None,
            connect_timeout: None,
        }
    }
}

impl NotifyConfig {
    /// Create a new NotifyConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `SSE_NOTIFY_*` environment variables.
    pub fn from_env() -> Self {
        Self::default().apply_env(|key| std::env::var(key).ok())
    }

    /// Apply overrides from a variable lookup. Unparseable values are ignored.
    pub fn apply_env<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_RECONNECT) {
            match value.trim().to_ascii_lowercase().as_str() {
                "0" | "false" | "no" | "off" => self.reconnect = false,
                "1" | "true" | "yes" | "on" => self.reconnect = true,
                other => tracing::warn!("ignoring {}={:?}", ENV_RECONNECT, other),
            }
        }
        if let Some(value) = lookup(ENV_INITIAL_WAIT_MS) {
            match value.trim().parse::<u64>() {
                Ok(ms) => self.initial_wait = Duration::from_millis(ms),
                Err(_) => tracing::warn!("ignoring {}={:?}", ENV_INITIAL_WAIT_MS, value),
            }
        }
        self
    }

    /// Set whether to reconnect after the stream ends.
    pub fn with_reconnect(mut self, reconnect: bool) -> Self {
        self.reconnect = reconnect;
        self
    }

    /// Set the reconnection wait used before any `retry` field arrives.
    pub fn with_initial_wait(mut self, wait: Duration) -> Self {
        self.initial_wait = wait;
        self
    }

    /// Add a request header.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.extra_headers.insert(name.into(), value.into());
        self
    }

    /// Set the channel capacity used by `Subscription::spawn`. Zero is raised to one.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Set the whole-request timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = NotifyConfig::default();
        assert!(config.reconnect);
        assert_eq!(config.initial_wait, Duration::from_millis(1000));
        assert!(config.extra_headers.is_empty());
        assert_eq!(config.channel_capacity, 1);
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn test_builder() {
        let config = NotifyConfig::new()
            .with_reconnect(false)
            .with_initial_wait(Duration::from_millis(10))
            .with_header("X-Token", "abc")
            .with_channel_capacity(0)
            .with_connect_timeout(Duration::from_secs(5));
        assert!(!config.reconnect);
        assert_eq!(config.initial_wait, Duration::from_millis(10));
        assert_eq!(config.extra_headers.get("X-Token"), Some(&"abc".to_string()));
        assert_eq!(config.channel_capacity, 1);
        assert_eq!(config.connect_timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_env_overrides() {
        let config = NotifyConfig::default().apply_env(lookup(&[
            (ENV_RECONNECT, "false"),
            (ENV_INITIAL_WAIT_MS, "250"),
        ]));
        assert!(!config.reconnect);
        assert_eq!(config.initial_wait, Duration::from_millis(250));
    }

    #[test]
    fn test_invalid_env_values_are_ignored() {
        let config = NotifyConfig::default().apply_env(lookup(&[
            (ENV_RECONNECT, "maybe"),
            (ENV_INITIAL_WAIT_MS, "soon"),
        ]));
        assert_eq!(config, NotifyConfig::default());
    }
}
