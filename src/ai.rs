//! Client for a hosted LLM messages endpoint.
//!
//! One request per call, no retries. Callers decide what to show when a call
//! fails; see `coach` for the fallbacks.

use crate::config::AiConfig;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const API_VERSION: &str = "2023-06-01";

#[derive(Debug, Error)]
pub enum AiError {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("endpoint returned {status}: {body}")]
    Status { status: StatusCode, body: String },
    #[error("response contained no text")]
    Empty,
    #[error("response was not the expected JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: MessageContent<'a>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum MessageContent<'a> {
    Text(&'a str),
    Blocks(Vec<ContentBlock<'a>>),
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock<'a> {
    Text { text: &'a str },
    Image { source: ImageSource<'a> },
}

#[derive(Debug, Serialize)]
pub struct ImageSource<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media_type: &'a str,
    pub data: &'a str,
}

impl<'a> ImageSource<'a> {
    pub fn base64(media_type: &'a str, data: &'a str) -> Self {
        Self {
            kind: "base64",
            media_type,
            data,
        }
    }
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
struct ResponseBlock {
    #[serde(default)]
    text: Option<String>,
}

#[derive(Clone)]
pub struct AiClient {
    http: reqwest::Client,
    api_key: String,
    url: String,
    model: String,
}

impl AiClient {
    /// `Ok(None)` when no API key is configured.
    pub fn from_config(config: &AiConfig) -> Result<Option<Self>, AiError> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Some(Self {
            http,
            api_key,
            url: config.url.clone(),
            model: config.model.clone(),
        }))
    }

    /// Sends one user turn and returns the concatenated text blocks, trimmed.
    pub async fn complete(
        &self,
        system: &str,
        content: MessageContent<'_>,
        max_tokens: u32,
    ) -> Result<String, AiError> {
        let request = MessagesRequest {
            model: &self.model,
            max_tokens,
            system,
            messages: [Message {
                role: "user",
                content,
            }],
        };

        let response = self
            .http
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AiError::Status { status, body });
        }

        let body: MessagesResponse = response.json().await?;
        let text = join_text(&body.content);
        if text.is_empty() {
            return Err(AiError::Empty);
        }
        Ok(text)
    }

    pub async fn complete_text(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, AiError> {
        self.complete(system, MessageContent::Text(user), max_tokens)
            .await
    }
}

fn join_text(blocks: &[ResponseBlock]) -> String {
    blocks
        .iter()
        .filter_map(|block| block.text.as_deref())
        .collect::<String>()
        .trim()
        .to_string()
}

/// Removes markdown code fences a model tends to wrap JSON answers in.
pub fn strip_code_fences(text: &str) -> &str {
    let mut text = text.trim();
    if let Some(rest) = text.strip_prefix("```") {
        text = rest.strip_prefix("json").unwrap_or(rest);
    }
    if let Some(rest) = text.strip_suffix("```") {
        text = rest;
    }
    text.trim()
}
