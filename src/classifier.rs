//! Response classification.
//!
//! Decides, once per call and before any decoding, whether a response is a
//! stream to decode or an application error to report.

use bytes::BytesMut;
use futures_util::StreamExt;

use crate::error::{ApiErrorBody, ResponseError, StreamError, StreamResult};
use crate::traits::{ByteStream, StreamingResponse};

/// Classify a response by status and (for failures) its error body.
///
/// - 2xx: `Ok(())`, the body is streamed as-is
/// - no error body, or only whitespace: a generic [`ResponseError`]
/// - a JSON error object: a [`ResponseError`] carrying it
/// - anything else: [`StreamError::ErrorBody`]
pub fn classify(status: u16, error_body: Option<&[u8]>) -> StreamResult<()> {
    if (200..300).contains(&status) {
        return Ok(());
    }
    Err(classify_error(status, error_body))
}

fn classify_error(status: u16, error_body: Option<&[u8]>) -> StreamError {
    let body = match error_body {
        Some(body) if !body.iter().all(u8::is_ascii_whitespace) => body,
        _ => {
            tracing::debug!("HTTP {} with no error body", status);
            return ResponseError::generic(status).into();
        }
    };

    match serde_json::from_slice::<ApiErrorBody>(body) {
        Ok(parsed) => {
            tracing::debug!(
                "HTTP {} classified as API error: {}",
                status,
                parsed.error.message
            );
            ResponseError::with_error(status, parsed.error).into()
        }
        Err(source) => {
            tracing::warn!("HTTP {} with unparseable error body: {}", status, source);
            StreamError::ErrorBody { status, source }
        }
    }
}

/// Gate a response: hand back the body of a successful response, or read the
/// error body once and turn it into the call's error.
pub async fn gate(response: StreamingResponse) -> StreamResult<ByteStream> {
    let status = response.status;
    if response.is_success() {
        tracing::debug!("HTTP {} accepted for streaming", status);
        return Ok(response.body);
    }

    let body = read_body(response.body).await?;
    Err(classify_error(status, Some(&body)))
}

async fn read_body(mut body: ByteStream) -> StreamResult<BytesMut> {
    let mut buf = BytesMut::new();
    while let Some(chunk) = body.next().await {
        buf.extend_from_slice(&chunk?);
    }
    Ok(buf)
}
