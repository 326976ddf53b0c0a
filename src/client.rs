//! Streaming completion client.
//!
//! [`StreamClient`] ties the pieces together for one call: send the request,
//! gate the response, then spawn a decoder task that feeds an
//! [`EventStream`] the caller pulls from.

use futures_util::StreamExt;
use tokio_util::sync::CancellationToken;

use crate::adapters::{channel, EventStream, ReqwestHttpClient};
use crate::classifier;
use crate::config::StreamConfig;
use crate::error::StreamResult;
use crate::sse::{lines, StreamDecoder};
use crate::traits::{Headers, HttpClient};

/// Client for streaming completion calls over any [`HttpClient`].
///
/// # Example
///
/// ```ignore
/// use completion_stream::{StreamClient, StreamConfig};
/// use futures_util::StreamExt;
///
/// let client = StreamClient::from_config(StreamConfig::from_env())?;
/// let mut events = client.stream(url, &request_json, &headers).await?;
/// while let Some(event) = events.next().await {
///     println!("{}", event?.payload());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct StreamClient<C: HttpClient> {
    http: C,
    config: StreamConfig,
}

impl<C: HttpClient> StreamClient<C> {
    pub fn new(http: C, config: StreamConfig) -> Self {
        Self { http, config }
    }

    pub fn config(&self) -> &StreamConfig {
        &self.config
    }

    pub fn http_client(&self) -> &C {
        &self.http
    }

    /// Start a streaming call.
    ///
    /// Returns once the response has been classified. A rejected call fails
    /// here and no decoder is started.
    pub async fn stream(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
    ) -> StreamResult<EventStream> {
        self.stream_with_cancel(url, body, headers, CancellationToken::new())
            .await
    }

    /// Start a streaming call that stops when `cancel` is cancelled.
    ///
    /// Cancellation ends the returned stream without an error.
    pub async fn stream_with_cancel(
        &self,
        url: &str,
        body: &str,
        headers: &Headers,
        cancel: CancellationToken,
    ) -> StreamResult<EventStream> {
        let response = self.http.post_stream(url, body, headers).await?;
        let body = classifier::gate(response).await?;

        let (mut sink, events) = channel(self.config.channel_capacity, &cancel);
        let decoder = StreamDecoder::new(self.config.decode_options());

        // End the line source on cancellation so a stalled body is dropped.
        let stop = sink.cancellation_token();
        let source = lines(body).take_until(async move { stop.cancelled().await });

        tokio::spawn(async move {
            decoder.run(source, &mut sink).await;
        });

        Ok(events)
    }
}

impl StreamClient<ReqwestHttpClient> {
    /// Client over reqwest with the timeouts from `config`.
    pub fn from_config(config: StreamConfig) -> StreamResult<Self> {
        let http = ReqwestHttpClient::from_config(&config)?;
        Ok(Self::new(http, config))
    }
}
