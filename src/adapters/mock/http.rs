//! Mock HTTP client for testing.
//!
//! Replays canned streaming responses by URL and records every request so
//! tests can assert on what was sent.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::traits::{ByteStream, Headers, HttpClient, HttpError, StreamingResponse};

/// A recorded HTTP request for verification in tests.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Request URL
    pub url: String,
    /// Request headers
    pub headers: Headers,
    /// Request body
    pub body: String,
}

/// Configuration for a mock response.
#[derive(Debug, Clone)]
pub enum MockResponse {
    /// Respond with a status and a body delivered in the given chunks
    Stream { status: u16, chunks: Vec<Bytes> },
    /// Respond with a status, deliver the chunks, then fail mid-body
    Interrupted {
        status: u16,
        chunks: Vec<Bytes>,
        error: HttpError,
    },
    /// Fail before any response arrives
    Error(HttpError),
}

impl MockResponse {
    /// A 200 response whose body is `body`, one chunk per line.
    pub fn event_stream(body: &str) -> Self {
        let chunks = body
            .split_inclusive('\n')
            .map(|line| Bytes::from(line.to_string()))
            .collect();
        MockResponse::Stream {
            status: 200,
            chunks,
        }
    }

    /// A non-success response with a single-chunk body.
    pub fn status(status: u16, body: &str) -> Self {
        let chunks = if body.is_empty() {
            Vec::new()
        } else {
            vec![Bytes::from(body.to_string())]
        };
        MockResponse::Stream { status, chunks }
    }
}

/// Mock HTTP client for testing.
///
/// # Example
///
/// ```ignore
/// use completion_stream::adapters::mock::{MockHttpClient, MockResponse};
///
/// let client = MockHttpClient::new();
/// client.set_response(
///     "https://api.example.com/v1/chat/completions",
///     MockResponse::event_stream("data: hi\n\ndata: [DONE]\n\n"),
/// );
/// ```
#[derive(Debug, Clone)]
pub struct MockHttpClient {
    /// Configured responses by URL
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    /// Default response when no specific match
    default_response: Arc<Mutex<Option<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self {
            responses: Arc::new(Mutex::new(HashMap::new())),
            default_response: Arc::new(Mutex::new(None)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Set a response for a specific URL.
    pub fn set_response(&self, url: &str, response: MockResponse) {
        let mut responses = self.responses.lock().unwrap();
        responses.insert(url.to_string(), response);
    }

    /// Set a default response for URLs without specific matches.
    pub fn set_default_response(&self, response: MockResponse) {
        let mut default = self.default_response.lock().unwrap();
        *default = Some(response);
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn record_request(&self, url: &str, headers: &Headers, body: &str) {
        let mut requests = self.requests.lock().unwrap();
        requests.push(RecordedRequest {
            url: url.to_string(),
            headers: headers.clone(),
            body: body.to_string(),
        });
    }

    fn get_response(&self, url: &str) -> Option<MockResponse> {
        let responses = self.responses.lock().unwrap();
        if let Some(response) = responses.get(url) {
            return Some(response.clone());
        }
        self.default_response.lock().unwrap().clone()
    }
}

impl Default for MockHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

fn body_of(chunks: Vec<Bytes>, error: Option<HttpError>) -> ByteStream {
    let items = chunks.into_iter().map(Ok).chain(error.map(Err));
    Box::pin(futures::stream::iter(items))
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> Result<StreamingResponse, HttpError> {
        self.record_request(url, headers, body);

        match self.get_response(url) {
            Some(MockResponse::Stream { status, chunks }) => {
                Ok(StreamingResponse::new(status, body_of(chunks, None)))
            }
            Some(MockResponse::Interrupted {
                status,
                chunks,
                error,
            }) => Ok(StreamingResponse::new(status, body_of(chunks, Some(error)))),
            Some(MockResponse::Error(err)) => Err(err),
            None => Err(HttpError::Other(format!("No mock response for URL: {}", url))),
        }
    }
}
