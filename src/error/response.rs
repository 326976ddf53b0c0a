//! Errors produced when the response is classified as a failure.
//!
//! Completion APIs answer a rejected call with a single JSON object of the
//! shape `{"error": {"message": ..., "type": ..., "param": ..., "code": ...}}`.
//! [`ApiErrorBody`] mirrors that envelope and [`ResponseError`] carries it
//! together with the HTTP status.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

use crate::traits::HttpError;

/// Top-level error envelope returned by the API on non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: ApiError,
}

/// Structured error details from the API.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable message.
    #[serde(default)]
    pub message: String,
    /// Error type, e.g. `invalid_request_error`.
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    /// Request parameter the error refers to, if any.
    #[serde(default)]
    pub param: Option<String>,
    /// Application error code. Some providers send it as a number.
    #[serde(default, deserialize_with = "string_or_number")]
    pub code: Option<String>,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        None | Some(serde_json::Value::Null) => None,
        Some(serde_json::Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// The call failed before streaming began.
///
/// `error` is `None` when the server sent no error body; in that case only the
/// status and the generic HTTP error are available.
#[derive(Debug)]
pub struct ResponseError {
    pub status: u16,
    pub error: Option<ApiError>,
    pub cause: HttpError,
}

impl fmt::Display for ResponseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.error {
            Some(e) => match e.error_type.as_deref() {
                Some(t) => write!(f, "HTTP {}: {} ({})", self.status, e.message, t),
                None => write!(f, "HTTP {}: {}", self.status, e.message),
            },
            None => write!(f, "HTTP {}", self.status),
        }
    }
}

impl std::error::Error for ResponseError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.cause)
    }
}

impl ResponseError {
    /// A failure with no structured payload.
    pub fn generic(status: u16) -> Self {
        Self {
            status,
            error: None,
            cause: HttpError::ServerError {
                status,
                message: String::new(),
            },
        }
    }

    /// A failure with a parsed error body.
    pub fn with_error(status: u16, error: ApiError) -> Self {
        let cause = HttpError::ServerError {
            status,
            message: error.message.clone(),
        };
        Self {
            status,
            error: Some(error),
            cause,
        }
    }

    pub fn message(&self) -> Option<&str> {
        self.error.as_ref().map(|e| e.message.as_str())
    }

    pub fn code(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.code.as_deref())
    }

    pub fn error_type(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.error_type.as_deref())
    }

    pub fn param(&self) -> Option<&str> {
        self.error.as_ref().and_then(|e| e.param.as_deref())
    }
}
