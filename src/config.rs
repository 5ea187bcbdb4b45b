//! Runtime configuration.

use std::time::Duration;

use crate::ws::DEFAULT_RECONNECT_DELAY;

/// Client configuration.
///
/// Built with the `with_*` setters or from environment variables via
/// [`Config::from_env`].
#[derive(Debug, Clone)]
pub struct Config {
    /// Channel identifier used in the title and moderation updates.
    pub channel: String,
    /// WebSocket endpoint delivering the chat stream.
    pub ws_url: String,
    /// Base URL of the moderation API.
    pub api_base_url: String,
    /// Delay between reconnection attempts (fixed, no backoff).
    pub reconnect_delay: Duration,
    /// Optional cap on retained records; `None` keeps the whole session.
    pub max_records: Option<usize>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            channel: "omfs24".to_string(),
            ws_url: "wss://omfs24.com:8080/".to_string(),
            api_base_url: "https://omfs24.com/api".to_string(),
            reconnect_delay: DEFAULT_RECONNECT_DELAY,
            max_records: None,
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_channel(mut self, channel: impl Into<String>) -> Self {
        self.channel = channel.into();
        self
    }

    pub fn with_ws_url(mut self, url: impl Into<String>) -> Self {
        self.ws_url = url.into();
        self
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay = delay;
        self
    }

    pub fn with_max_records(mut self, max: usize) -> Self {
        self.max_records = Some(max);
        self
    }

    /// Read overrides from `CHATWATCH_CHANNEL`, `CHATWATCH_WS_URL`,
    /// `CHATWATCH_API_URL`, and `CHATWATCH_MAX_RECORDS`.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(channel) = std::env::var("CHATWATCH_CHANNEL") {
            config.channel = channel;
        }
        if let Ok(url) = std::env::var("CHATWATCH_WS_URL") {
            config.ws_url = url;
        }
        if let Ok(url) = std::env::var("CHATWATCH_API_URL") {
            config.api_base_url = url;
        }
        if let Ok(max) = std::env::var("CHATWATCH_MAX_RECORDS") {
            if let Ok(max) = max.parse() {
                config.max_records = Some(max);
            }
        }
        config
    }
}
