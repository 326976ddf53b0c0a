//! Recording event sink for testing.

use async_trait::async_trait;

use crate::error::StreamError;
use crate::sse::Event;
use crate::traits::EventSink;

/// What the sink has been told about the end of the stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkOutcome {
    /// Neither `complete` nor `fail` was called.
    Pending,
    Completed,
    /// `fail` was called; carries the error's display text.
    Failed(String),
}

/// Sink that records everything the decoder does to it.
///
/// `cancel_after(n)` makes the sink report cancellation once `n` events
/// have been pushed.
#[derive(Debug, Default)]
pub struct RecordingSink {
    events: Vec<Event>,
    completions: usize,
    failures: Vec<StreamError>,
    cancel_after: Option<usize>,
    cancelled: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel_after(events: usize) -> Self {
        Self {
            cancel_after: Some(events),
            ..Self::default()
        }
    }

    /// Report cancellation from now on.
    pub fn cancel(&mut self) {
        self.cancelled = true;
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn payloads(&self) -> Vec<&str> {
        self.events.iter().map(Event::payload).collect()
    }

    pub fn failures(&self) -> &[StreamError] {
        &self.failures
    }

    /// Number of `complete` plus `fail` calls.
    pub fn terminal_signals(&self) -> usize {
        self.completions + self.failures.len()
    }

    pub fn outcome(&self) -> SinkOutcome {
        if let Some(err) = self.failures.first() {
            SinkOutcome::Failed(err.to_string())
        } else if self.completions > 0 {
            SinkOutcome::Completed
        } else {
            SinkOutcome::Pending
        }
    }

    /// The offending line, if the stream failed on framing.
    pub fn decode_error_line(&self) -> Option<String> {
        self.failures.iter().find_map(|e| match e {
            StreamError::Decode(err) => Some(err.line.clone()),
            _ => None,
        })
    }
}

#[async_trait]
impl EventSink for RecordingSink {
    async fn push(&mut self, event: Event) {
        self.events.push(event);
    }

    async fn complete(&mut self) {
        self.completions += 1;
    }

    async fn fail(&mut self, error: StreamError) {
        self.failures.push(error);
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled
            || self
                .cancel_after
                .is_some_and(|limit| self.events.len() >= limit)
    }
}
