//! Error category classification.
//!
//! Categories give callers one place to decide whether a failed stream is
//! worth retrying, independent of which layer produced the failure.

use std::fmt;

/// High-level categorization of stream failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Connection, DNS, timeout or mid-body I/O failures.
    /// Generally transient and retryable.
    Network,

    /// The server asked the caller to slow down (HTTP 429).
    RateLimit,

    /// Backend/server-side errors (HTTP 5xx).
    Server,

    /// The request itself was rejected (HTTP 4xx other than 429).
    /// Not retryable without changing the request.
    Client,

    /// The server spoke the wrong protocol: bad framing or an
    /// error body that does not match the error schema.
    Protocol,
}

impl ErrorCategory {
    /// Returns true if errors in this category are generally transient.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ErrorCategory::Network | ErrorCategory::RateLimit | ErrorCategory::Server
        )
    }

    /// Returns a short label for the category suitable for logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCategory::Network => "network",
            ErrorCategory::RateLimit => "rate_limit",
            ErrorCategory::Server => "server",
            ErrorCategory::Client => "client",
            ErrorCategory::Protocol => "protocol",
        }
    }

    /// Categorize a non-success HTTP status code.
    pub fn from_status(status: u16) -> Self {
        match status {
            429 => ErrorCategory::RateLimit,
            500..=599 => ErrorCategory::Server,
            _ => ErrorCategory::Client,
        }
    }
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
