//! Outbound side of the chat transport as seen by command handlers.

use async_trait::async_trait;
use tracing::{error, info};

use crate::errors::BotError;

/// Markup carried by a reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyFormat {
    Plain,
    Html,
}

/// Final text produced for one command, with its markup mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    pub text: String,
    pub format: ReplyFormat,
}

impl Reply {
    #[must_use]
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Plain,
        }
    }

    #[must_use]
    pub fn html(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: ReplyFormat::Html,
        }
    }
}

/// Sends text back into a chat.
#[async_trait]
pub trait ReplySink: Send + Sync {
    /// # Errors
    ///
    /// Returns an error if the transport could not deliver the message.
    async fn send_text(&self, chat_id: i64, text: &str, format: ReplyFormat)
    -> Result<(), BotError>;
}

/// Fire-and-forget send: delivery failures are logged and swallowed.
pub async fn deliver(sink: &dyn ReplySink, chat_id: i64, text: &str, format: ReplyFormat) {
    match sink.send_text(chat_id, text, format).await {
        Ok(()) => info!("Delivered reply to chat {}", chat_id),
        Err(e) => error!(
            error_kind = e.kind(),
            "Failed to deliver reply to chat {}: {}", chat_id, e
        ),
    }
}
