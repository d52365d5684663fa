use std::env;

use log::warn;

/// Process configuration, read once at startup. Missing credentials are
/// warned about rather than fatal so the service still boots far enough for
/// first-time setup.
#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub openai_api_key: String,
    pub owner_telegram_id: Option<i64>,
    pub public_base_url: Option<String>,
    pub image_vibe: String,
    pub image_model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        let telegram_bot_token = env::var("TELEGRAM_BOT_TOKEN").unwrap_or_default();
        let openai_api_key = env::var("OPENAI_API_KEY").unwrap_or_default();
        let owner_telegram_id = env::var("OWNER_TELEGRAM_ID")
            .ok()
            .and_then(|raw| raw.trim().parse::<i64>().ok());
        let public_base_url = env::var("PUBLIC_BASE_URL").ok().filter(|v| !v.is_empty());
        let image_vibe = env::var("IMAGE_VIBE")
            .unwrap_or_else(|_| "clean".to_string())
            .to_lowercase();
        let image_model =
            env::var("OPENAI_IMAGE_MODEL").unwrap_or_else(|_| "gpt-image-1".to_string());
        let port = env::var("PORT")
            .ok()
            .and_then(|raw| raw.parse::<u16>().ok())
            .unwrap_or(3000);

        if telegram_bot_token.is_empty() {
            warn!("TELEGRAM_BOT_TOKEN is not set");
        }
        if openai_api_key.is_empty() {
            warn!("OPENAI_API_KEY is not set");
        }
        if owner_telegram_id.is_none() {
            warn!("OWNER_TELEGRAM_ID is not set");
        }

        Self {
            telegram_bot_token,
            openai_api_key,
            owner_telegram_id,
            public_base_url,
            image_vibe,
            image_model,
            port,
        }
    }
}
