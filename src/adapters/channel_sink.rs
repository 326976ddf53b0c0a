//! Bounded-channel event sink and the consumer-side [`EventStream`].
//!
//! The decoder task holds the [`ChannelSink`]; the caller holds the
//! [`EventStream`]. A full channel makes `push` wait, which is the
//! backpressure path. Dropping the `EventStream` (or cancelling its token)
//! is the cancellation path.

use std::pin::Pin;
use std::task::{Context, Poll};

use async_trait::async_trait;
use futures::Stream;
use futures_util::StreamExt;
use tokio::sync::mpsc;
use tokio_util::sync::{CancellationToken, DropGuard};

use crate::error::{StreamError, StreamResult};
use crate::sse::Event;
use crate::traits::EventSink;

type Item = Result<Event, StreamError>;

/// Create a connected sink/stream pair.
///
/// `cancel` is used as a parent: cancelling it stops the decoder, while
/// dropping the returned stream cancels only this call.
pub fn channel(capacity: usize, cancel: &CancellationToken) -> (ChannelSink, EventStream) {
    let (tx, rx) = mpsc::channel(capacity.max(1));
    let token = cancel.child_token();
    let sink = ChannelSink {
        tx: Some(tx),
        cancel: token.clone(),
    };
    let stream = EventStream {
        rx,
        cancel: token.clone(),
        _guard: token.drop_guard(),
    };
    (sink, stream)
}

/// Producer half, driven by the decoder.
#[derive(Debug)]
pub struct ChannelSink {
    /// `None` once a terminal signal has been sent.
    tx: Option<mpsc::Sender<Item>>,
    cancel: CancellationToken,
}

impl ChannelSink {
    /// Cancelled once the consumer drops or cancels its [`EventStream`].
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    async fn send(&self, item: Item) {
        let Some(tx) = &self.tx else {
            return;
        };
        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => {}
            result = tx.send(item) => {
                if result.is_err() {
                    tracing::debug!("event stream receiver dropped");
                }
            }
        }
    }
}

#[async_trait]
impl EventSink for ChannelSink {
    async fn push(&mut self, event: Event) {
        self.send(Ok(event)).await;
    }

    async fn complete(&mut self) {
        // Closing the channel is the completion signal.
        self.tx = None;
    }

    async fn fail(&mut self, error: StreamError) {
        self.send(Err(error)).await;
        self.tx = None;
    }

    fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled() || self.tx.as_ref().map_or(true, |tx| tx.is_closed())
    }
}

/// Consumer half: an ordered stream of events ending in either nothing
/// (completion) or a single `Err` (failure).
///
/// Dropping the stream cancels the decoder.
#[derive(Debug)]
pub struct EventStream {
    rx: mpsc::Receiver<Item>,
    cancel: CancellationToken,
    _guard: DropGuard,
}

impl EventStream {
    /// Stop the decoder. The stream yields nothing further.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Drain the stream into its payloads, stopping at the first failure.
    pub async fn collect_payloads(mut self) -> StreamResult<Vec<String>> {
        let mut payloads = Vec::new();
        while let Some(item) = self.next().await {
            payloads.push(item?.into_payload());
        }
        Ok(payloads)
    }
}

impl Stream for EventStream {
    type Item = Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.get_mut();
        if this.cancel.is_cancelled() {
            return Poll::Ready(None);
        }
        this.rx.poll_recv(cx)
    }
}
