use log::{error, info, warn};
use serde_json::Value;

use crate::openai::OpenAiClient;
use crate::parse::parse_user_message;
use crate::telegram::{TelegramClient, TelegramError};
use crate::types::extract_message;

const MIN_PROMPT_CHARS: usize = 10;
const MIN_LYRICS_CHARS: usize = 50;

const USAGE_HINT: &str = "Send PROMPT and LYRICS. Example:\nPROMPT: ...\nLYRICS: ...";
const DEBUG_HINT: &str =
    "Debug mode: check the service logs to get your chat_id, then set OWNER_TELEGRAM_ID";

/// Per-process state shared by all webhook invocations. Nothing here is
/// mutable, so concurrent invocations never contend.
pub struct AppState {
    pub telegram: TelegramClient,
    pub openai: OpenAiClient,
    pub owner_id: Option<i64>,
    pub vibe: String,
}

/// Terminal outcome of one webhook invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebhookStatus {
    Ignored,
    Debug,
    Unauthorized,
    Invalid,
    Error,
    Ok,
}

impl WebhookStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            WebhookStatus::Ignored => "ignored",
            WebhookStatus::Debug => "debug",
            WebhookStatus::Unauthorized => "unauthorized",
            WebhookStatus::Invalid => "invalid",
            WebhookStatus::Error => "error",
            WebhookStatus::Ok => "ok",
        }
    }
}

/// Run one inbound update through the pipeline: authorize, parse, generate a
/// title, deliver it, then attempt the thumbnail. Each stage's failure is
/// converted into a user-facing reply; only a delivery failure on those
/// replies escapes to the caller.
pub async fn process_update(
    state: &AppState,
    payload: &Value,
) -> Result<WebhookStatus, TelegramError> {
    let Some(message) = extract_message(payload) else {
        return Ok(WebhookStatus::Ignored);
    };
    info!(
        "Incoming message id={} from={}",
        message.message_id, message.sender_id
    );

    let Some(owner_id) = state.owner_id else {
        // Deliberate insecure fallback for first-time setup: with no owner
        // configured, anyone can reach the bot and is told how to claim it.
        warn!("OWNER_TELEGRAM_ID not set, running in open debug mode");
        state.telegram.send_message(message.chat_id, DEBUG_HINT).await?;
        return Ok(WebhookStatus::Debug);
    };

    if message.chat_type != "private" {
        info!("Ignoring non-private chat type={}", message.chat_type);
        return Ok(WebhookStatus::Ignored);
    }

    if message.sender_id != owner_id {
        state
            .telegram
            .send_message(message.chat_id, "Not authorized.")
            .await?;
        return Ok(WebhookStatus::Unauthorized);
    }

    let (prompt, lyrics) = parse_user_message(&message.text);
    if prompt.chars().count() < MIN_PROMPT_CHARS || lyrics.chars().count() < MIN_LYRICS_CHARS {
        state.telegram.send_message(message.chat_id, USAGE_HINT).await?;
        return Ok(WebhookStatus::Invalid);
    }

    let title = match state.openai.generate_title(&prompt, &lyrics).await {
        Ok(title) => title,
        Err(err) => {
            error!("Title generation failed: {}", err);
            state
                .telegram
                .send_message(message.chat_id, "Failed to generate title. Try again.")
                .await?;
            return Ok(WebhookStatus::Error);
        }
    };
    info!("Generated title: {}", title);
    state.telegram.send_message(message.chat_id, &title).await?;

    // The title already went out, so an image failure only degrades the reply.
    let sent = match state.openai.generate_thumbnail(&title, &state.vibe).await {
        Ok(bytes) => state
            .telegram
            .send_photo(message.chat_id, &bytes, Some(&title))
            .await
            .map_err(|err| err.to_string()),
        Err(err) => Err(err.to_string()),
    };
    match sent {
        Ok(()) => info!("Thumbnail sent"),
        Err(err) => {
            error!("Image generation failed: {}", err);
            state
                .telegram
                .send_message(
                    message.chat_id,
                    &format!("Title: {title}\nImage generation failed. Try again."),
                )
                .await?;
        }
    }

    Ok(WebhookStatus::Ok)
}
