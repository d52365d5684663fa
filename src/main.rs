use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::{Json, Router, routing::get, routing::post};
use log::{error, info, warn};
use serde_json::{Value, json};

use song_brand_service::config::Config;
use song_brand_service::openai::OpenAiClient;
use song_brand_service::telegram::TelegramClient;
use song_brand_service::webhook::{AppState, process_update};

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let state = Arc::new(AppState {
        telegram: TelegramClient::new(&config.telegram_bot_token),
        openai: OpenAiClient::new(&config.openai_api_key, &config.image_model),
        owner_id: config.owner_telegram_id,
        vibe: config.image_vibe.clone(),
    });

    // Register the webhook if we know our public address; a failure here is
    // logged and the service keeps booting.
    match &config.public_base_url {
        Some(base) => {
            let webhook_url = format!("{}/telegram/webhook", base.trim_end_matches('/'));
            match state.telegram.set_webhook(&webhook_url).await {
                Ok(response) => info!("Webhook setup response: {}", response),
                Err(err) => error!("Failed to set webhook: {}", err),
            }
        }
        None => warn!("PUBLIC_BASE_URL not set; webhook not configured"),
    }

    let app = Router::new()
        .route("/", get(|| async { "OK" }))
        .route("/health", get(health))
        .route("/debug/chat-id", get(debug_chat_id))
        .route("/telegram/webhook", post(telegram_webhook))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port))
        .await
        .unwrap();
    axum::serve(listener, app).await.unwrap();
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn debug_chat_id() -> Json<Value> {
    Json(json!({
        "instruction": "Send any message to the Telegram bot, then check the service logs for \
TELEGRAM DEBUG chat_id=..."
    }))
}

async fn telegram_webhook(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    match process_update(&state, &payload).await {
        Ok(status) => Ok(Json(json!({ "status": status.as_str() }))),
        Err(err) => {
            error!("Failed to deliver reply: {}", err);
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}
