//! Stream configuration.
//!
//! Use the builder methods to customize a call, or [`StreamConfig::from_env`]
//! to pick up overrides from the environment.

use std::time::Duration;

use crate::sse::{DataLineMode, DecodeOptions};

/// Default bound on events buffered between decoder and consumer.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 32;

pub const ENV_EMIT_DONE: &str = "COMPLETION_STREAM_EMIT_DONE";
pub const ENV_CHANNEL_CAPACITY: &str = "COMPLETION_STREAM_CHANNEL_CAPACITY";
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "COMPLETION_STREAM_REQUEST_TIMEOUT_SECS";

/// Configuration for streaming calls.
///
/// # Example
///
/// ```ignore
/// use completion_stream::StreamConfig;
///
/// let config = StreamConfig::default()
///     .with_emit_done(true)
///     .with_channel_capacity(64);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamConfig {
    /// Deliver the `[DONE]` sentinel as a final event (default: false)
    pub emit_done: bool,
    /// Events buffered before the decoder waits on the consumer (default: 32)
    pub channel_capacity: usize,
    /// How repeated `data:` lines combine (default: last wins)
    pub data_line_mode: DataLineMode,
    /// TCP connect timeout for the reqwest client
    pub connect_timeout: Option<Duration>,
    /// Whole-call timeout for the reqwest client, including reading the body
    pub request_timeout: Option<Duration>,
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            emit_done: false,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
            data_line_mode: DataLineMode::LastWins,
            connect_timeout: None,
            request_timeout: None,
        }
    }
}

impl StreamConfig {
    /// Create a new StreamConfig with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `COMPLETION_STREAM_*` environment variables.
    ///
    /// Unparseable values are ignored with a warning.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(ENV_EMIT_DONE) {
            match value.trim() {
                "1" | "true" | "yes" => config.emit_done = true,
                "0" | "false" | "no" => config.emit_done = false,
                other => tracing::warn!("ignoring {}={:?}", ENV_EMIT_DONE, other),
            }
        }

        if let Some(value) = lookup(ENV_CHANNEL_CAPACITY) {
            match value.trim().parse::<usize>() {
                Ok(capacity) => config = config.with_channel_capacity(capacity),
                Err(_) => tracing::warn!("ignoring {}={:?}", ENV_CHANNEL_CAPACITY, value),
            }
        }

        if let Some(value) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            match value.trim().parse::<u64>() {
                Ok(secs) => config.request_timeout = Some(Duration::from_secs(secs)),
                Err(_) => tracing::warn!("ignoring {}={:?}", ENV_REQUEST_TIMEOUT_SECS, value),
            }
        }

        config
    }

    /// Set whether the `[DONE]` sentinel is delivered.
    pub fn with_emit_done(mut self, emit_done: bool) -> Self {
        self.emit_done = emit_done;
        self
    }

    /// Set the channel capacity. Zero is raised to one.
    pub fn with_channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity.max(1);
        self
    }

    /// Set how repeated `data:` lines combine.
    pub fn with_data_line_mode(mut self, mode: DataLineMode) -> Self {
        self.data_line_mode = mode;
        self
    }

    /// Set the connect timeout.
    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the whole-call timeout.
    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }

    /// Decoder options for one call.
    pub fn decode_options(&self) -> DecodeOptions {
        DecodeOptions {
            emit_terminal_event: self.emit_done,
            data_line_mode: self.data_line_mode,
        }
    }
}
