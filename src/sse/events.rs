//! Event type definitions.

use std::fmt;

use serde::de::DeserializeOwned;

/// Field prefix that marks a payload line.
pub const DATA_PREFIX: &str = "data:";

/// Payload that ends the stream.
pub const DONE_SENTINEL: &str = "[DONE]";

/// One decoded unit of streamed content.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Event {
    payload: String,
}

impl Event {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }

    /// The payload with the `data:` prefix and surrounding whitespace removed.
    pub fn payload(&self) -> &str {
        &self.payload
    }

    pub fn into_payload(self) -> String {
        self.payload
    }

    /// True iff this is the `[DONE]` sentinel.
    pub fn is_terminal(&self) -> bool {
        self.payload == DONE_SENTINEL
    }

    /// Deserialize the payload as JSON.
    ///
    /// Payloads are opaque to the decoder; this is a convenience for
    /// consumers whose payloads are JSON chunks.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_str(&self.payload)
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.payload)
    }
}

/// How consecutive `data:` lines within one event combine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DataLineMode {
    /// Each `data:` line replaces the previous one.
    #[default]
    LastWins,
    /// Payloads are joined with `\n`, as in full event-stream framing.
    Concatenate,
}

/// Extract the payload of a `data:` line, or `None` for any other line.
pub fn parse_data_line(line: &str) -> Option<&str> {
    line.strip_prefix(DATA_PREFIX).map(str::trim)
}
