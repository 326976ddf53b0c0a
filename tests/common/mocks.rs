//! Mock implementations for test fixtures.
//!
//! Re-exports the mocks from `completion_stream::adapters::mock` and adds a
//! builder for wiring canned responses.

pub use completion_stream::adapters::mock::{MockHttpClient, MockResponse, RecordingSink};
pub use completion_stream::traits::{Headers, HttpClient, HttpError};

use bytes::Bytes;

/// Configuration for setting up mock HTTP responses.
pub struct MockHttpConfig {
    client: MockHttpClient,
}

impl MockHttpConfig {
    /// Creates a new mock HTTP configuration.
    pub fn new() -> Self {
        Self {
            client: MockHttpClient::new(),
        }
    }

    /// Configures a 200 event-stream response, one chunk per line.
    pub fn with_event_stream(self, url: &str, body: &str) -> Self {
        self.client
            .set_response(url, MockResponse::event_stream(body));
        self
    }

    /// Configures a 200 event-stream response split into the given chunks.
    pub fn with_chunks(self, url: &str, chunks: &[&[u8]]) -> Self {
        let chunks = chunks.iter().map(|c| Bytes::copy_from_slice(c)).collect();
        self.client
            .set_response(url, MockResponse::Stream { status: 200, chunks });
        self
    }

    /// Configures a rejected call with the given error body.
    pub fn with_status(self, url: &str, status: u16, body: &str) -> Self {
        self.client.set_response(url, MockResponse::status(status, body));
        self
    }

    /// Configures a stream that breaks after `body` has been delivered.
    pub fn with_interrupted(self, url: &str, body: &str, error: HttpError) -> Self {
        self.client.set_response(
            url,
            MockResponse::Interrupted {
                status: 200,
                chunks: vec![Bytes::from(body.to_string())],
                error,
            },
        );
        self
    }

    /// Configures a transport failure before any response.
    pub fn with_transport_error(self, url: &str, error: HttpError) -> Self {
        self.client.set_response(url, MockResponse::Error(error));
        self
    }

    /// Builds the configured MockHttpClient.
    pub fn build(self) -> MockHttpClient {
        self.client
    }
}

impl Default for MockHttpConfig {
    fn default() -> Self {
        Self::new()
    }
}
