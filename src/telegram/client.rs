//! Telegram Bot API client module
//!
//! Long-polls `getUpdates` for inbound messages and sends replies with
//! `sendMessage`.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};
use serde_json::{Value, json};
use std::time::Duration;
use tracing::warn;

use crate::core::models::IncomingMessage;
use crate::core::reply::{ReplyFormat, ReplySink};
use crate::errors::BotError;

/// Seconds Telegram holds a `getUpdates` request open when there is nothing new.
pub const LONG_POLL_TIMEOUT_SECS: u64 = 30;

/// Telegram rejects messages longer than this many UTF-16 code units.
pub const MAX_MESSAGE_UNITS: usize = 4096;

#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

impl Update {
    /// The text message carried by this update, if any.
    #[must_use]
    pub fn into_incoming(self) -> Option<IncomingMessage> {
        let message = self.message?;
        Some(IncomingMessage {
            chat_id: message.chat.id,
            user_id: message.from.map(|u| u.id),
            text: message.text?,
        })
    }
}

/// Telegram API client
pub struct TelegramClient {
    http: Client,
    base_url: String,
    token: String,
}

impl TelegramClient {
    #[must_use]
    pub fn new(token: String, base_url: String) -> Self {
        // Must outlive the long-poll hold time.
        let http = Client::builder()
            .timeout(Duration::from_secs(LONG_POLL_TIMEOUT_SECS + 15))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, payload: &Value) -> Result<T, BotError> {
        let response = self
            .http
            .post(self.method_url(method))
            .json(payload)
            .send()
            .await
            // reqwest errors embed the URL, which carries the bot token.
            .map_err(|e| {
                BotError::HttpError(format!("{method} request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        let body: ApiResponse<T> = response.json().await.map_err(|e| {
            BotError::ParseError(format!(
                "{method} returned HTTP {}: {}",
                status.as_u16(),
                e.without_url()
            ))
        })?;

        if !body.ok {
            return Err(BotError::TelegramError(format!(
                "{method} returned ok=false: {}",
                body.description.unwrap_or_else(|| "no description".to_string())
            )));
        }

        body.result
            .ok_or_else(|| BotError::TelegramError(format!("{method} missing result")))
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or Telegram reports `ok=false`.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>, BotError> {
        let mut payload = json!({
            "timeout": LONG_POLL_TIMEOUT_SECS,
            "allowed_updates": ["message"],
        });
        if let Some(offset) = offset {
            payload["offset"] = json!(offset);
        }
        self.call("getUpdates", &payload).await
    }

    /// Username of the bot account, used to recognise `/cmd@username`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or Telegram reports `ok=false`.
    pub async fn get_me(&self) -> Result<User, BotError> {
        self.call("getMe", &json!({})).await
    }

    /// # Errors
    ///
    /// Returns an error if the request fails or Telegram reports `ok=false`.
    pub async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        format: ReplyFormat,
    ) -> Result<(), BotError> {
        let _: Value = self
            .call("sendMessage", &build_send_message_payload(chat_id, text, format))
            .await?;
        Ok(())
    }
}

#[async_trait]
impl ReplySink for TelegramClient {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: ReplyFormat,
    ) -> Result<(), BotError> {
        self.send_message(chat_id, text, format).await
    }
}

/// Longest prefix of `text` that fits in `limit` UTF-16 code units.
fn truncate_to_units(text: &str, limit: usize) -> &str {
    let mut used = 0;
    for (idx, c) in text.char_indices() {
        used += c.len_utf16();
        if used > limit {
            return &text[..idx];
        }
    }
    text
}

/// Build the JSON payload for `sendMessage`.
///
/// Formatted replies are already sized to fit; this cut only catches plain
/// text that echoes long user input.
#[must_use]
pub fn build_send_message_payload(chat_id: i64, text: &str, format: ReplyFormat) -> Value {
    let fitted = truncate_to_units(text, MAX_MESSAGE_UNITS);
    if fitted.len() < text.len() {
        warn!("Reply exceeds {} UTF-16 units, truncating", MAX_MESSAGE_UNITS);
    }
    let text = fitted;

    let mut payload = json!({
        "chat_id": chat_id,
        "text": text,
    });
    if format == ReplyFormat::Html {
        payload["parse_mode"] = Value::String("HTML".to_string());
        payload["link_preview_options"] = json!({ "is_disabled": true });
    }
    payload
}
