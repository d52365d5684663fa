use std::time::Duration;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use log::{info, warn};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::prompts::build_image_prompt;
use crate::sanitize::sanitize_title;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

const TITLE_MODEL: &str = "gpt-4o-mini";
const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Error from the title or image generation calls.
#[derive(Debug)]
pub enum OpenAiError {
    Http(reqwest::Error),
    Api { status: u16, body: String },
    EmptyResponse,
    MissingImageData,
    Decode(base64::DecodeError),
}

impl std::fmt::Display for OpenAiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OpenAiError::Http(e) => write!(f, "HTTP error: {}", e),
            OpenAiError::Api { status, body } => write!(f, "API error {}: {}", status, body),
            OpenAiError::EmptyResponse => write!(f, "response contained no choices"),
            OpenAiError::MissingImageData => write!(f, "image response missing data"),
            OpenAiError::Decode(e) => write!(f, "base64 decode error: {}", e),
        }
    }
}

impl std::error::Error for OpenAiError {}

impl From<reqwest::Error> for OpenAiError {
    fn from(err: reqwest::Error) -> Self {
        OpenAiError::Http(err)
    }
}

impl From<base64::DecodeError> for OpenAiError {
    fn from(err: base64::DecodeError) -> Self {
        OpenAiError::Decode(err)
    }
}

/// Image backends differ in the request shape they accept, not just the
/// values. Keeping the two shapes behind a tag stops family-specific fields
/// from leaking into the wrong request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageModelFamily {
    /// `gpt-image-*` models: embedded image data is the API default, so no
    /// response format is requested.
    GptImage,
    /// Everything else (e.g. `dall-e-3`): base64 JSON must be asked for
    /// explicitly.
    Classic,
}

impl ImageModelFamily {
    pub fn detect(model: &str) -> Self {
        if model.starts_with("gpt-image-") {
            ImageModelFamily::GptImage
        } else {
            ImageModelFamily::Classic
        }
    }

    pub fn size(self) -> &'static str {
        match self {
            ImageModelFamily::GptImage => "1536x1024",
            ImageModelFamily::Classic => "1792x1024",
        }
    }
}

/// Build the generation request body for a model. The shape is decided by the
/// model family; mixing the two shapes produces a rejected upstream request.
pub fn build_image_payload(model: &str, prompt: &str) -> Value {
    let family = ImageModelFamily::detect(model);
    match family {
        ImageModelFamily::GptImage => json!({
            "model": model,
            "prompt": prompt,
            "n": 1,
            "size": family.size(),
            "output_format": "png",
            "quality": "high",
            "background": "transparent",
        }),
        ImageModelFamily::Classic => json!({
            "model": model,
            "prompt": prompt,
            "n": 1,
            "size": family.size(),
            "response_format": "b64_json",
        }),
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ImagesResponse {
    data: Vec<ImageData>,
}

#[derive(Debug, Deserialize)]
struct ImageData {
    #[serde(default)]
    b64_json: Option<String>,
    #[serde(default)]
    url: Option<String>,
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    base_url: String,
    image_model: String,
}

impl OpenAiClient {
    pub fn new(api_key: &str, image_model: &str) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(60))
            .connect_timeout(Duration::from_secs(10))
            .build()
            .expect("failed to build HTTP client");
        Self {
            client,
            api_key: api_key.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            image_model: image_model.to_string(),
        }
    }

    /// Point the client at a different API host (used by tests).
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    /// Ask the chat model for a 1-2 word song title. The model is told to
    /// answer with JSON, but whatever comes back goes through the sanitizer,
    /// which is the single source of truth for title shape.
    pub async fn generate_title(&self, prompt: &str, lyrics: &str) -> Result<String, OpenAiError> {
        let system_message = "You are a music branding assistant. \
Return JSON only with fields: title, language, reason_short. \
Title must be 1-2 words, no punctuation, no quotes.";
        let user_message =
            format!("Song prompt: {prompt}\n\nLyrics:\n{lyrics}\n\nRespond with JSON only.");
        let request = ChatRequest {
            model: TITLE_MODEL,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_message.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: user_message,
                },
            ],
            temperature: 0.7,
        };

        let response = self
            .client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown error".into());
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: ChatResponse = response.json().await?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(OpenAiError::EmptyResponse)?
            .message
            .content
            .unwrap_or_default();
        let candidate = extract_title_from_json(&content);
        Ok(sanitize_title(&candidate))
    }

    /// Generate the thumbnail for a title and vibe, returning raw image bytes.
    pub async fn generate_thumbnail(&self, title: &str, vibe: &str) -> Result<Vec<u8>, OpenAiError> {
        let spec = build_image_prompt(title, vibe);
        let final_prompt = format!("{}\n\nNEGATIVE: {}", spec.prompt, spec.negative_prompt);
        let family = ImageModelFamily::detect(&self.image_model);
        info!(
            "Image generation request model={} size={} response_format_omitted={}",
            self.image_model,
            family.size(),
            family == ImageModelFamily::GptImage
        );
        let payload = build_image_payload(&self.image_model, &final_prompt);

        let response = self
            .client
            .post(format!("{}/images/generations", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "unknown error".into());
            return Err(OpenAiError::Api {
                status: status.as_u16(),
                body,
            });
        }
        let parsed: ImagesResponse = response.json().await?;
        let data = parsed
            .data
            .into_iter()
            .next()
            .ok_or(OpenAiError::MissingImageData)?;

        if let Some(b64) = data.b64_json {
            let bytes = BASE64.decode(b64)?;
            info!("Image bytes length: {}", bytes.len());
            return Ok(bytes);
        }
        if let Some(url) = data.url {
            let bytes = self.download_image(&url).await?;
            info!("Image bytes length: {}", bytes.len());
            return Ok(bytes);
        }
        Err(OpenAiError::MissingImageData)
    }

    async fn download_image(&self, url: &str) -> Result<Vec<u8>, OpenAiError> {
        let response = self
            .client
            .get(url)
            .timeout(DOWNLOAD_TIMEOUT)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.bytes().await?.to_vec())
    }
}

/// Pull the `title` field out of a JSON reply. Non-JSON content is treated as
/// the candidate title itself; the sanitizer cleans up either way.
fn extract_title_from_json(content: &str) -> String {
    match serde_json::from_str::<Value>(content) {
        Ok(Value::Object(map)) => match map.get("title") {
            Some(Value::String(title)) => title.clone(),
            Some(other) => other.to_string(),
            None => String::new(),
        },
        Ok(_) => String::new(),
        Err(_) => {
            warn!("Failed to parse JSON from model response; content={}", content);
            content.to_string()
        }
    }
}
