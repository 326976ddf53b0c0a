//! End-to-end streaming tests against a wiremock server.
//!
//! These drive `StreamClient<ReqwestHttpClient>` over real HTTP so the
//! chunked body goes through reqwest, the line reader and the decoder.

mod common;

use std::time::Duration;

use common::{delta_chunk, init_tracing, sse_body, sse_events};
use completion_stream::traits::{Headers, HttpError};
use completion_stream::{Event, StreamClient, StreamConfig, StreamError};
use futures_util::StreamExt;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const COMPLETIONS_PATH: &str = "/v1/chat/completions";

async fn mount_stream(server: &MockServer, body: impl Into<String>) {
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_raw(body.into(), "text/event-stream"))
        .mount(server)
        .await;
}

fn url(server: &MockServer) -> String {
    format!("{}{}", server.uri(), COMPLETIONS_PATH)
}

fn client(config: StreamConfig) -> StreamClient<completion_stream::adapters::ReqwestHttpClient> {
    StreamClient::from_config(config).expect("client builds")
}

#[tokio::test]
async fn test_events_arrive_in_order_and_done_is_hidden() {
    init_tracing();
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&["A", "B", "C"])).await;

    let events = client(StreamConfig::default())
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    assert_eq!(events.collect_payloads().await.unwrap(), vec!["A", "B", "C"]);
}

#[tokio::test]
async fn test_done_is_delivered_when_enabled() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&["A"])).await;

    let events = client(StreamConfig::default().with_emit_done(true))
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    assert_eq!(
        events.collect_payloads().await.unwrap(),
        vec!["A", "[DONE]"]
    );
}

#[tokio::test]
async fn test_request_carries_body_and_headers() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .and(header("Authorization", "Bearer sk-test"))
        .and(header("Accept", "text/event-stream"))
        .and(body_json(serde_json::json!({"model": "m", "stream": true})))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(sse_body(&["ok"]), "text/event-stream"),
        )
        .expect(1)
        .mount(&server)
        .await;

    let mut headers = Headers::new();
    headers.insert("Authorization".to_string(), "Bearer sk-test".to_string());
    headers.insert("Content-Type".to_string(), "application/json".to_string());

    let events = client(StreamConfig::default())
        .stream(&url(&server), r#"{"model":"m","stream":true}"#, &headers)
        .await
        .unwrap();

    assert_eq!(events.collect_payloads().await.unwrap(), vec!["ok"]);
}

#[tokio::test]
async fn test_json_chunks_decode() {
    let server = MockServer::start().await;
    let chunks = [delta_chunk("Hel"), delta_chunk("lo")];
    let refs: Vec<&str> = chunks.iter().map(String::as_str).collect();
    mount_stream(&server, sse_body(&refs)).await;

    let mut events = client(StreamConfig::default())
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    let mut text = String::new();
    while let Some(event) = events.next().await {
        let event: Event = event.unwrap();
        let chunk: serde_json::Value = event.json().unwrap();
        text.push_str(chunk["choices"][0]["delta"]["content"].as_str().unwrap());
    }
    assert_eq!(text, "Hello");
}

#[tokio::test]
async fn test_crlf_framing() {
    let server = MockServer::start().await;
    mount_stream(&server, "data: A\r\n\r\ndata: B\r\n\r\ndata: [DONE]\r\n\r\n").await;

    let events = client(StreamConfig::default())
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    assert_eq!(events.collect_payloads().await.unwrap(), vec!["A", "B"]);
}

#[tokio::test]
async fn test_last_data_line_wins() {
    let server = MockServer::start().await;
    mount_stream(&server, "data: first\ndata: second\n\ndata: [DONE]\n\n").await;

    let events = client(StreamConfig::default())
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    assert_eq!(events.collect_payloads().await.unwrap(), vec!["second"]);
}

#[tokio::test]
async fn test_nothing_after_sentinel_is_delivered() {
    let server = MockServer::start().await;
    mount_stream(&server, "data: A\n\ndata: [DONE]\n\ndata: B\n\ngarbage\n").await;

    let events = client(StreamConfig::default())
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    assert_eq!(events.collect_payloads().await.unwrap(), vec!["A"]);
}

#[tokio::test]
async fn test_end_of_body_without_sentinel_completes() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_events(&["A", "B"])).await;

    let events = client(StreamConfig::default())
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    assert_eq!(events.collect_payloads().await.unwrap(), vec!["A", "B"]);
}

#[tokio::test]
async fn test_stray_line_recovered_by_data_line() {
    let server = MockServer::start().await;
    mount_stream(&server, ": keep-alive\ndata: A\n\ndata: [DONE]\n\n").await;

    let events = client(StreamConfig::default())
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    assert_eq!(events.collect_payloads().await.unwrap(), vec!["A"]);
}

#[tokio::test]
async fn test_unresolved_stray_line_fails_after_events() {
    let server = MockServer::start().await;
    mount_stream(&server, "data: A\n\nevent: oops\n").await;

    let mut events = client(StreamConfig::default())
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    assert_eq!(events.next().await.unwrap().unwrap().payload(), "A");
    match events.next().await {
        Some(Err(StreamError::Decode(e))) => assert_eq!(e.line, "event: oops"),
        other => panic!("Expected decode failure, got {:?}", other),
    }
    assert!(events.next().await.is_none());
}

#[tokio::test]
async fn test_dropping_stream_stops_consumption() {
    let server = MockServer::start().await;
    let payloads: Vec<String> = (0..500).map(|i| i.to_string()).collect();
    let refs: Vec<&str> = payloads.iter().map(String::as_str).collect();
    mount_stream(&server, sse_body(&refs)).await;

    let mut events = client(StreamConfig::default().with_channel_capacity(2))
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    assert_eq!(events.next().await.unwrap().unwrap().payload(), "0");
    assert_eq!(events.next().await.unwrap().unwrap().payload(), "1");
    drop(events);
}

#[tokio::test]
async fn test_explicit_cancel_ends_stream() {
    let server = MockServer::start().await;
    mount_stream(&server, sse_body(&["A", "B", "C"])).await;

    let mut events = client(StreamConfig::default())
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap();

    events.cancel();
    assert!(events.next().await.is_none());
}

#[tokio::test]
async fn test_slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(COMPLETIONS_PATH))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(sse_body(&["late"]), "text/event-stream")
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = StreamConfig::default().with_request_timeout(Duration::from_millis(200));
    let err = client(config)
        .stream(&url(&server), "{}", &Headers::new())
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::Transport(HttpError::Timeout(_))));
    assert_eq!(err.error_code(), "E_STREAM_TIMEOUT");
}
