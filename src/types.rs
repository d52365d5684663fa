use log::warn;
use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct WebhookUpdate {
    pub message: Option<RawMessage>,
    pub edited_message: Option<RawMessage>,
}

#[derive(Debug, Deserialize)]
pub struct RawMessage {
    pub message_id: Option<i64>,
    pub chat: Option<RawChat>,
    pub from: Option<RawUser>,
    pub text: Option<String>, // Text might be missing (e.g., photo messages)
}

#[derive(Debug, Deserialize)]
pub struct RawChat {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RawUser {
    pub id: Option<i64>,
    pub username: Option<String>,
}

/// One fully-formed inbound message, built once per webhook call. A payload
/// missing `chat`, `from` or their ids yields no message at all rather than a
/// half-filled value.
#[derive(Debug, Clone)]
pub struct InboundMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub chat_type: String,
    pub text: String,
    pub sender_id: i64,
}

pub fn extract_message(payload: &Value) -> Option<InboundMessage> {
    let update: WebhookUpdate = serde_json::from_value(payload.clone()).ok()?;
    let message = update.message.or(update.edited_message)?;
    let chat = message.chat?;
    let from = message.from?;
    let chat_id = chat.id?;
    let sender_id = from.id?;
    let message_id = message.message_id?;
    let chat_type = chat.kind.unwrap_or_default();
    let username = from.username.unwrap_or_else(|| "unknown".to_string());

    // First-time-setup aid; /debug/chat-id tells the operator to look for this line.
    warn!(
        "TELEGRAM DEBUG chat_id={} user_id={} username={} chat_type={}",
        chat_id, sender_id, username, chat_type
    );

    Some(InboundMessage {
        chat_id,
        message_id,
        chat_type,
        text: message.text.unwrap_or_default(),
        sender_id,
    })
}
