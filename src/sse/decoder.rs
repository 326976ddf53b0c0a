//! Event framing state machine.
//!
//! [`StreamDecoder::feed_line`] is the pure framing step; [`StreamDecoder::run`]
//! drives it over a line source and publishes into an [`EventSink`].
//!
//! Framing rules:
//! - a `data:` line sets the pending event and clears any stray-line marker
//! - a blank line dispatches the pending event; `[DONE]` ends the stream
//! - a blank line with nothing pending is ignored
//! - any other line is remembered as stray; if no `data:` line follows it
//!   before the source ends, the stream fails with [`DecodeError`]

use futures::Stream;
use futures_util::StreamExt;

use super::events::{parse_data_line, DataLineMode, Event};
use crate::error::{DecodeError, StreamError};
use crate::traits::{EventSink, HttpError};

/// Options for one decoding run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecodeOptions {
    /// Deliver the `[DONE]` sentinel to the sink before ending.
    pub emit_terminal_event: bool,
    pub data_line_mode: DataLineMode,
}

/// Outcome of feeding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dispatch {
    /// Nothing to deliver yet.
    None,
    /// A complete event.
    Event(Event),
    /// The sentinel was framed. Carries it only if it should be delivered.
    Terminal(Option<Event>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum StreamState {
    Accumulating { pending: Option<Event> },
    Terminated,
    Failed(DecodeError),
    Cancelled,
}

/// Per-call decoder. Consumed by [`StreamDecoder::run`]; never reused.
#[derive(Debug)]
pub struct StreamDecoder {
    options: DecodeOptions,
    state: StreamState,
    /// Last stray line not yet followed by a `data:` line.
    malformed: Option<String>,
}

impl StreamDecoder {
    pub fn new(options: DecodeOptions) -> Self {
        Self {
            options,
            state: StreamState::Accumulating { pending: None },
            malformed: None,
        }
    }

    /// Whether the sentinel has been framed.
    pub fn is_terminated(&self) -> bool {
        self.state == StreamState::Terminated
    }

    /// Feed one line (terminator already stripped).
    ///
    /// Lines fed after the sentinel are ignored.
    pub fn feed_line(&mut self, line: &str) -> Dispatch {
        let StreamState::Accumulating { pending } = &mut self.state else {
            return Dispatch::None;
        };

        if let Some(data) = parse_data_line(line) {
            let next = match (self.options.data_line_mode, pending.take()) {
                (DataLineMode::Concatenate, Some(prev)) => {
                    Event::new(format!("{}\n{}", prev.payload(), data))
                }
                _ => Event::new(data),
            };
            *pending = Some(next);
            if let Some(stray) = self.malformed.take() {
                tracing::trace!("stray line {:?} superseded by data line", stray);
            }
            return Dispatch::None;
        }

        if line.is_empty() {
            let Some(event) = pending.take() else {
                return Dispatch::None;
            };
            if event.is_terminal() {
                self.state = StreamState::Terminated;
                let delivered = self.options.emit_terminal_event.then_some(event);
                return Dispatch::Terminal(delivered);
            }
            return Dispatch::Event(event);
        }

        tracing::debug!("stray line in event stream: {:?}", line);
        self.malformed = Some(line.to_string());
        Dispatch::None
    }

    /// Resolve the end of the source into success or a framing failure.
    ///
    /// A partially accumulated event with no closing blank line is dropped.
    pub fn finish(&mut self) -> Result<(), DecodeError> {
        match &self.state {
            StreamState::Failed(err) => return Err(err.clone()),
            StreamState::Cancelled => return Ok(()),
            StreamState::Accumulating { pending: Some(event) } => {
                tracing::debug!("source ended with unterminated event: {:?}", event.payload());
            }
            _ => {}
        }

        match self.malformed.take() {
            Some(line) => {
                let err = DecodeError::new(line);
                self.state = StreamState::Failed(err.clone());
                Err(err)
            }
            None => {
                if !self.is_terminated() {
                    self.state = StreamState::Terminated;
                }
                Ok(())
            }
        }
    }

    /// Decode `lines` into `sink` until the sentinel, the end of the source,
    /// a read failure, or cancellation.
    ///
    /// The line source is owned by this call and dropped before the terminal
    /// signal is sent, on every path.
    pub async fn run<L, S>(mut self, lines: L, sink: &mut S)
    where
        L: Stream<Item = Result<String, HttpError>> + Send,
        S: EventSink + ?Sized,
    {
        let mut lines = Box::pin(lines);
        let mut delivered = 0usize;
        let mut read_error = None;

        tracing::debug!(
            "decoder started (emit_terminal_event={}, mode={:?})",
            self.options.emit_terminal_event,
            self.options.data_line_mode
        );

        loop {
            if sink.is_cancelled() {
                self.state = StreamState::Cancelled;
                break;
            }

            let line = match lines.next().await {
                Some(Ok(line)) => line,
                Some(Err(e)) => {
                    read_error = Some(e);
                    break;
                }
                None => break,
            };

            match self.feed_line(&line) {
                Dispatch::None => {}
                Dispatch::Event(event) => {
                    tracing::trace!("dispatching event #{}: {}", delivered, event.payload());
                    sink.push(event).await;
                    delivered += 1;
                }
                Dispatch::Terminal(event) => {
                    if let Some(event) = event {
                        sink.push(event).await;
                        delivered += 1;
                    }
                    break;
                }
            }
        }

        drop(lines);
        tracing::trace!("line source released");

        if sink.is_cancelled() {
            tracing::debug!("decoder cancelled after {} events", delivered);
            return;
        }

        if let Some(e) = read_error {
            tracing::warn!("event stream read failed after {} events: {}", delivered, e);
            sink.fail(StreamError::Transport(e)).await;
            return;
        }

        match self.finish() {
            Ok(()) => {
                tracing::debug!("event stream completed with {} events", delivered);
                sink.complete().await;
            }
            Err(e) => {
                tracing::warn!("event stream failed after {} events: {}", delivered, e);
                sink.fail(StreamError::Decode(e)).await;
            }
        }
    }
}

/// Decode `lines` into `sink` with a fresh decoder.
pub async fn decode<L, S>(lines: L, sink: &mut S, options: DecodeOptions)
where
    L: Stream<Item = Result<String, HttpError>> + Send,
    S: EventSink + ?Sized,
{
    StreamDecoder::new(options).run(lines, sink).await
}
