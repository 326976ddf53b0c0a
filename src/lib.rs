//! Completion Stream - incremental decoding of streaming completion responses
//!
//! Turns a chunked `text/event-stream` HTTP body into an ordered stream of
//! events with backpressure and cancellation, after classifying the response
//! as a stream or an application error.

pub mod adapters;
pub mod classifier;
pub mod client;
pub mod config;
pub mod error;
pub mod sse;
pub mod traits;

pub use adapters::EventStream;
pub use client::StreamClient;
pub use config::StreamConfig;
pub use error::{ResponseError, StreamError, StreamResult};
pub use sse::{DataLineMode, Event};
