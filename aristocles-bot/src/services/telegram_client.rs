//! Telegram Bot API client
//!
//! Covers the three calls the bot makes: `sendMessage`, `sendPhoto` and
//! `setWebhook`. Every response is checked for `"ok": true`.
//!
//! Request URLs embed the bot token, so transport errors are stripped of
//! their URL before they are logged or returned.

use crate::services::{ChatSink, TextFormat};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, RequestBuilder};
use serde::Deserialize;
use serde_json::{json, Value};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

/// Telegram Bot API base URL
const TELEGRAM_API_URL: &str = "https://api.telegram.org";

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

const PHOTO_FILE_NAME: &str = "cover.jpg";

/// Telegram client errors
#[derive(Debug, Error)]
pub enum TelegramError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Telegram API error: {0}")]
    Api(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

/// Envelope of every Bot API response
#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    error_code: Option<i64>,
}

/// Telegram Bot API client
pub struct TelegramClient {
    http_client: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    pub fn new(token: &str) -> Result<Self, TelegramError> {
        let http_client = Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(|e| TelegramError::Network(e.without_url().to_string()))?;

        Ok(Self {
            http_client,
            base_url: TELEGRAM_API_URL.to_string(),
            token: token.to_string(),
        })
    }

    /// Point the client at another API root (used by tests)
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Send a request and check the response envelope
    async fn call(&self, method: &str, request: RequestBuilder) -> Result<(), TelegramError> {
        let response = request
            .send()
            .await
            .map_err(|e| TelegramError::Network(e.without_url().to_string()))?;

        let status = response.status();
        let envelope: ApiResponse = response
            .json()
            .await
            .map_err(|e| TelegramError::Parse(e.without_url().to_string()))?;

        if !envelope.ok {
            return Err(TelegramError::Api(format!(
                "{} failed ({}): {}",
                method,
                envelope.error_code.unwrap_or(i64::from(status.as_u16())),
                envelope.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        debug!(method = method, "Telegram call succeeded");
        Ok(())
    }

    /// Register the webhook URL Telegram should deliver updates to
    pub async fn set_webhook(&self, url: &str) -> Result<(), TelegramError> {
        let request = self
            .http_client
            .post(self.method_url("setWebhook"))
            .json(&json!({ "url": url }));
        self.call("setWebhook", request).await
    }
}

fn text_body(chat_id: i64, text: &str, format: TextFormat) -> Value {
    let mut body = json!({ "chat_id": chat_id, "text": text });
    if let Some(mode) = format.parse_mode() {
        body["parse_mode"] = Value::from(mode);
    }
    body
}

#[async_trait]
impl ChatSink for TelegramClient {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: TextFormat,
    ) -> Result<(), TelegramError> {
        let request = self
            .http_client
            .post(self.method_url("sendMessage"))
            .json(&text_body(chat_id, text, format));
        self.call("sendMessage", request).await
    }

    async fn send_photo(
        &self,
        chat_id: i64,
        photo: Vec<u8>,
        caption: &str,
    ) -> Result<(), TelegramError> {
        let mut form = Form::new()
            .text("chat_id", chat_id.to_string())
            .text("caption", caption.to_string())
            .part("photo", Part::bytes(photo).file_name(PHOTO_FILE_NAME));
        if let Some(mode) = TextFormat::Markdown.parse_mode() {
            form = form.text("parse_mode", mode);
        }

        let request = self
            .http_client
            .post(self.method_url("sendPhoto"))
            .multipart(form);
        self.call("sendPhoto", request).await
    }
}
