use std::time::Duration;

use log::warn;
use reqwest::{Client, multipart};
use serde_json::Value;

/// Total attempts per outbound call, including the first one.
const RETRY_ATTEMPTS: u32 = 3;

#[derive(Debug)]
pub enum TelegramError {
    Http(reqwest::Error),
    Api { status: u16, body: String },
}

impl std::fmt::Display for TelegramError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelegramError::Http(e) => write!(f, "HTTP error: {}", e),
            TelegramError::Api { status, body } => {
                write!(f, "Telegram API error {}: {}", status, body)
            }
        }
    }
}

impl std::error::Error for TelegramError {}

impl From<reqwest::Error> for TelegramError {
    fn from(err: reqwest::Error) -> Self {
        TelegramError::Http(err)
    }
}

/// Bot API client. Every call is retried up to [`RETRY_ATTEMPTS`] times with
/// no backoff; the last failure is returned to the caller.
pub struct TelegramClient {
    client: Client,
    base_url: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Self {
        Self::with_base_url(&format!("https://api.telegram.org/bot{token}"))
    }

    /// Build a client against an arbitrary base URL (used by tests).
    pub fn with_base_url(base_url: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(10))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<(), TelegramError> {
        let form = [
            ("chat_id", chat_id.to_string()),
            ("text", text.to_string()),
        ];
        self.post_form("sendMessage", &form).await?;
        Ok(())
    }

    pub async fn send_photo(
        &self,
        chat_id: i64,
        photo: &[u8],
        caption: Option<&str>,
    ) -> Result<(), TelegramError> {
        let url = format!("{}/sendPhoto", self.base_url);
        let mut attempt = 0;
        loop {
            attempt += 1;
            // Multipart forms are consumed on send, so rebuild per attempt.
            let part = multipart::Part::bytes(photo.to_vec())
                .file_name("thumbnail.jpg")
                .mime_str("image/jpeg")?;
            let mut form = multipart::Form::new()
                .text("chat_id", chat_id.to_string())
                .part("photo", part);
            if let Some(caption) = caption {
                form = form.text("caption", caption.to_string());
            }

            let err = match self.client.post(&url).multipart(form).send().await {
                Ok(res) if res.status().is_success() => return Ok(()),
                Ok(res) => {
                    let status = res.status();
                    let body = res.text().await.unwrap_or_else(|_| "unknown error".into());
                    TelegramError::Api {
                        status: status.as_u16(),
                        body,
                    }
                }
                Err(e) => TelegramError::Http(e),
            };
            warn!(
                "Telegram sendPhoto failed (attempt {}/{}): {}",
                attempt, RETRY_ATTEMPTS, err
            );
            if attempt >= RETRY_ATTEMPTS {
                return Err(err);
            }
        }
    }

    pub async fn set_webhook(&self, url: &str) -> Result<Value, TelegramError> {
        let form = [("url", url.to_string())];
        self.post_form("setWebhook", &form).await
    }

    async fn post_form(
        &self,
        method: &str,
        form: &[(&str, String)],
    ) -> Result<Value, TelegramError> {
        let url = format!("{}/{}", self.base_url, method);
        let mut attempt = 0;
        loop {
            attempt += 1;
            let err = match self.client.post(&url).form(form).send().await {
                Ok(res) if res.status().is_success() => match res.json().await {
                    Ok(value) => return Ok(value),
                    Err(e) => TelegramError::Http(e),
                },
                Ok(res) => {
                    let status = res.status();
                    let body = res.text().await.unwrap_or_else(|_| "unknown error".into());
                    TelegramError::Api {
                        status: status.as_u16(),
                        body,
                    }
                }
                Err(e) => TelegramError::Http(e),
            };
            warn!(
                "Telegram {} failed (attempt {}/{}): {}",
                method, attempt, RETRY_ATTEMPTS, err
            );
            if attempt >= RETRY_ATTEMPTS {
                return Err(err);
            }
        }
    }
}
