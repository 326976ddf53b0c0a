//! Event sink trait abstraction.
//!
//! The decoder publishes into an [`EventSink`]. The sink owns the
//! backpressure policy (`push` may wait) and the cancellation signal
//! (`is_cancelled` is polled by the decoder).

use async_trait::async_trait;

use crate::error::StreamError;
use crate::sse::Event;

/// Destination for decoded events.
///
/// Contract upheld by the decoder:
/// - events are pushed in framing order
/// - at most one of `complete` / `fail` is called, and nothing after it
/// - neither is called once `is_cancelled` has returned true
#[async_trait]
pub trait EventSink: Send {
    /// Deliver one event. May wait for the consumer to make room.
    async fn push(&mut self, event: Event);

    /// The stream ended normally.
    async fn complete(&mut self);

    /// The stream ended with a failure.
    async fn fail(&mut self, error: StreamError);

    /// Whether the consumer has gone away or asked to stop.
    fn is_cancelled(&self) -> bool;
}
