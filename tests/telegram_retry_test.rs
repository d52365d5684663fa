use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Value, json};
use song_brand_service::telegram::TelegramClient;

mod common;

/// Backend stub that rejects the first `failures` calls and succeeds after.
struct Flaky {
    calls: AtomicUsize,
    failures: usize,
}

async fn flaky_handler(State(state): State<Arc<Flaky>>) -> (StatusCode, Json<Value>) {
    let call = state.calls.fetch_add(1, Ordering::SeqCst) + 1;
    if call <= state.failures {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({ "ok": false })))
    } else {
        (StatusCode::OK, Json(json!({ "ok": true, "result": true })))
    }
}

async fn flaky_client(failures: usize) -> (TelegramClient, Arc<Flaky>) {
    let state = Arc::new(Flaky {
        calls: AtomicUsize::new(0),
        failures,
    });
    let router = Router::new()
        .route("/sendMessage", post(flaky_handler))
        .route("/sendPhoto", post(flaky_handler))
        .route("/setWebhook", post(flaky_handler))
        .with_state(state.clone());
    let base = common::spawn(router).await;
    (TelegramClient::with_base_url(&base), state)
}

// ===== Retry policy =====

#[tokio::test]
async fn test_send_message_succeeds_on_third_attempt() {
    let (client, state) = flaky_client(2).await;
    client.send_message(7, "hello").await.unwrap();
    assert_eq!(state.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_send_message_gives_up_after_three_attempts() {
    let (client, state) = flaky_client(usize::MAX).await;
    let result = client.send_message(7, "hello").await;
    assert!(result.is_err());
    assert_eq!(state.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_send_message_first_attempt_success_does_not_retry() {
    let (client, state) = flaky_client(0).await;
    client.send_message(7, "hello").await.unwrap();
    assert_eq!(state.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_send_photo_retries_like_messages() {
    let (client, state) = flaky_client(2).await;
    client.send_photo(7, b"bytes", Some("caption")).await.unwrap();
    assert_eq!(state.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_send_photo_gives_up_after_three_attempts() {
    let (client, state) = flaky_client(usize::MAX).await;
    assert!(client.send_photo(7, b"bytes", None).await.is_err());
    assert_eq!(state.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_set_webhook_returns_backend_json() {
    let (client, _) = flaky_client(0).await;
    let response = client.set_webhook("https://example.com/telegram/webhook").await.unwrap();
    assert_eq!(response["ok"], true);
}

#[tokio::test]
async fn test_unreachable_backend_is_an_error() {
    // Nothing listens here; connection errors count against the retry budget.
    let client = TelegramClient::with_base_url("http://127.0.0.1:9");
    assert!(client.send_message(7, "hello").await.is_err());
}
