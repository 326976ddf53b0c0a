//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - HTTP transport using reqwest
//! - [`ChannelSink`] / [`EventStream`] - bounded-channel sink and its consumer handle
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - canned streaming responses
//! - [`mock::RecordingSink`] - sink that records what the decoder did

pub mod channel_sink;
pub mod mock;
pub mod reqwest_http;

pub use channel_sink::{channel, ChannelSink, EventStream};
pub use mock::{MockHttpClient, RecordingSink};
pub use reqwest_http::ReqwestHttpClient;
