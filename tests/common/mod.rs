//! Common test utilities for integration tests.
//!
//! Event-stream body builders, canned error bodies, and a tracing setup
//! shared by the integration test binaries.
//!
//! # Example
//!
//! ```ignore
//! mod common;
//! use common::{init_tracing, sse_body};
//!
//! init_tracing();
//! let body = sse_body(&["A", "B"]);
//! ```

#![allow(dead_code)]

pub mod mocks;

pub use mocks::*;

use tracing_subscriber::EnvFilter;

/// Install a test subscriber honouring `RUST_LOG`. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// One `data:` event per payload, followed by the `[DONE]` sentinel.
pub fn sse_body(payloads: &[&str]) -> String {
    let mut body = sse_events(payloads);
    body.push_str("data: [DONE]\n\n");
    body
}

/// One `data:` event per payload, with no sentinel.
pub fn sse_events(payloads: &[&str]) -> String {
    payloads
        .iter()
        .map(|p| format!("data: {}\n\n", p))
        .collect()
}

/// A chat-completion chunk carrying one content delta.
pub fn delta_chunk(content: &str) -> String {
    serde_json::json!({
        "object": "chat.completion.chunk",
        "choices": [{"index": 0, "delta": {"content": content}}]
    })
    .to_string()
}

/// A structured API error body.
pub fn error_json(message: &str, error_type: &str, code: &str) -> serde_json::Value {
    serde_json::json!({
        "error": {
            "message": message,
            "type": error_type,
            "param": null,
            "code": code
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sse_body() {
        assert_eq!(
            sse_body(&["A", "B"]),
            "data: A\n\ndata: B\n\ndata: [DONE]\n\n"
        );
    }

    #[test]
    fn test_sse_events_empty() {
        assert_eq!(sse_events(&[]), "");
    }

    #[test]
    fn test_error_json_shape() {
        let body = error_json("Bad key", "invalid_request_error", "invalid_api_key");
        assert_eq!(body["error"]["message"], "Bad key");
        assert!(body["error"]["param"].is_null());
    }
}
