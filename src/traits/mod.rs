//! Trait abstractions for dependency injection and testability.
//!
//! # Traits
//!
//! - [`HttpClient`] - streaming HTTP transport
//! - [`EventSink`] - destination for decoded events

pub mod http;
pub mod sink;

pub use http::{ByteStream, Headers, HttpClient, HttpError, StreamingResponse};
pub use sink::EventSink;
