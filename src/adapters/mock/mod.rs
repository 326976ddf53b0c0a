//! Mock implementations for testing.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - streaming transport with canned responses
//! - [`RecordingSink`] - event sink that records pushes and terminal signals

pub mod http;
pub mod sink;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use sink::{RecordingSink, SinkOutcome};
