//! Errors surfaced to the consumer of an event stream.
//!
//! Every fatal condition of a streaming call ends up as exactly one
//! [`StreamError`], whether it happened before streaming (classification),
//! while reading the body (transport), or while framing events (decode).

use thiserror::Error;

use super::category::ErrorCategory;
use super::response::ResponseError;
use crate::traits::HttpError;

/// A stray line that was never followed by a well-formed `data:` line.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid event-stream framing: {line:?}")]
pub struct DecodeError {
    /// The offending line, verbatim.
    pub line: String,
}

impl DecodeError {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

/// Terminal failure of a streaming call.
#[derive(Debug, Error)]
pub enum StreamError {
    /// Reading from the connection failed.
    #[error("transport error: {0}")]
    Transport(#[from] HttpError),

    /// The server rejected the call before streaming began.
    #[error(transparent)]
    Response(#[from] ResponseError),

    /// The server rejected the call and its error body could not be parsed.
    #[error("HTTP {status}: unreadable error body: {source}")]
    ErrorBody {
        status: u16,
        #[source]
        source: serde_json::Error,
    },

    /// The body violated the event framing.
    #[error(transparent)]
    Decode(#[from] DecodeError),
}

impl StreamError {
    /// Get the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            StreamError::Transport(HttpError::ServerError { status, .. }) => {
                ErrorCategory::from_status(*status)
            }
            StreamError::Transport(HttpError::InvalidUrl(_)) => ErrorCategory::Client,
            StreamError::Transport(_) => ErrorCategory::Network,
            StreamError::Response(err) => ErrorCategory::from_status(err.status),
            StreamError::ErrorBody { .. } | StreamError::Decode(_) => ErrorCategory::Protocol,
        }
    }

    /// Check if retrying the whole call may succeed.
    pub fn is_retryable(&self) -> bool {
        self.category().is_retryable()
    }

    /// Get a short error code for logging.
    pub fn error_code(&self) -> &'static str {
        match self {
            StreamError::Transport(HttpError::Timeout(_)) => "E_STREAM_TIMEOUT",
            StreamError::Transport(HttpError::ConnectionFailed(_)) => "E_STREAM_CONN",
            StreamError::Transport(_) => "E_STREAM_TRANSPORT",
            StreamError::Response(_) => "E_STREAM_RESPONSE",
            StreamError::ErrorBody { .. } => "E_STREAM_ERROR_BODY",
            StreamError::Decode(_) => "E_STREAM_DECODE",
        }
    }

    /// HTTP status associated with the failure, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            StreamError::Response(err) => Some(err.status),
            StreamError::ErrorBody { status, .. } => Some(*status),
            StreamError::Transport(HttpError::ServerError { status, .. }) => Some(*status),
            _ => None,
        }
    }
}

/// Type alias for Results using [`StreamError`].
pub type StreamResult<T> = Result<T, StreamError>;
