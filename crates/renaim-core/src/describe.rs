//! Image description service.
//!
//! The [`Describer`] trait is the seam between the synthesizer and the
//! remote model. [`OpenAiDescriber`] talks to an OpenAI-compatible chat
//! completions endpoint; tests substitute their own implementation.

use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default chat completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default vision-capable model.
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

const MAX_TOKENS: u32 = 300;
const MAX_DESCRIPTION_CHARS: usize = 100;

const PROMPT: &str = "Generate a descriptive filename for this image using a valid filename. \
Follow these rules:
* DO NOT add any extension to the filename
* DO NOT use words like: [in, a, the, with, an]
* DO be brief but clear
* DO use _ between words: like_this_example";

/// Errors from the description service.
#[derive(Debug, Error)]
pub enum DescribeError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Unauthorized: API key rejected")]
    Unauthorized,

    #[error("Service returned HTTP {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Service returned an empty description")]
    Empty,
}

/// Produces a short textual description of an image.
#[async_trait]
pub trait Describer: Send + Sync {
    /// Describes `image` (raw file bytes of type `mime`).
    async fn describe(
        &self,
        image: Vec<u8>,
        mime: &str,
        api_key: &str,
    ) -> Result<String, DescribeError>;
}

/// Client for OpenAI-compatible chat completion endpoints.
#[derive(Debug, Clone)]
pub struct OpenAiDescriber {
    endpoint: String,
    model: String,
    client: Client,
}

impl OpenAiDescriber {
    /// Create with explicit configuration.
    pub fn new(endpoint: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            model: model.into(),
            client: Client::new(),
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn payload(&self, image: &[u8], mime: &str) -> ChatRequest<'_> {
        ChatRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text { text: PROMPT },
                    ContentPart::ImageUrl {
                        image_url: ImageUrl {
                            url: format!("data:{mime};base64,{}", STANDARD.encode(image)),
                        },
                    },
                ],
            }],
        }
    }
}

impl Default for OpenAiDescriber {
    fn default() -> Self {
        Self::new(DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }
}

#[async_trait]
impl Describer for OpenAiDescriber {
    async fn describe(
        &self,
        image: Vec<u8>,
        mime: &str,
        api_key: &str,
    ) -> Result<String, DescribeError> {
        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&self.payload(&image, mime))
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(DescribeError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(DescribeError::Status { status, body });
        }

        let body = response.text().await?;
        extract_content(&body)
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: Vec<ContentPart<'a>>,
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: ImageUrl },
}

#[derive(Serialize)]
struct ImageUrl {
    url: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Pulls `choices[0].message.content` out of a chat completion body.
pub fn extract_content(body: &str) -> Result<String, DescribeError> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| DescribeError::MalformedResponse(e.to_string()))?;

    parsed
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .map(|content| content.trim().to_string())
        .filter(|content| !content.is_empty())
        .ok_or(DescribeError::Empty)
}

/// Turns free-form model output into a file-name stem.
///
/// Lowercases, strips a trailing extension the model may have added anyway,
/// replaces anything that is not a letter, digit, `-` or `_` with `_`,
/// collapses runs of `_` and caps the length. Returns `None` when nothing
/// usable remains.
pub fn sanitize_description(raw: &str) -> Option<String> {
    let mut text = raw
        .trim()
        .trim_matches(|c: char| matches!(c, '"' | '\'' | '`'))
        .trim();
    if let Some((stem, ext)) = text.rsplit_once('.') {
        if !stem.is_empty()
            && (1..=5).contains(&ext.len())
            && ext.chars().all(|c| c.is_ascii_alphanumeric())
        {
            text = stem;
        }
    }

    let mut out = String::with_capacity(text.len());
    for c in text.to_lowercase().chars() {
        let c = if c.is_alphanumeric() || c == '-' { c } else { '_' };
        if c == '_' && (out.is_empty() || out.ends_with('_')) {
            continue;
        }
        out.push(c);
    }

    let out: String = out.chars().take(MAX_DESCRIPTION_CHARS).collect();
    let out = out.trim_matches('_');
    if out.is_empty() {
        None
    } else {
        Some(out.to_string())
    }
}
