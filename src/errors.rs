use thiserror::Error;

#[derive(Debug, Error)]
pub enum BotError {
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Failed to send HTTP request: {0}")]
    HttpError(String),

    #[error("Failed to access news API: {0}")]
    NewsApiError(String),

    #[error("Failed to access OpenAI API: {0}")]
    LlmError(String),

    #[error("Failed to access Telegram API: {0}")]
    TelegramError(String),
}

impl BotError {
    /// Short, stable name of the error variant for log fields.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            BotError::ConfigError(_) => "config",
            BotError::ParseError(_) => "parse",
            BotError::HttpError(_) => "http",
            BotError::NewsApiError(_) => "news_api",
            BotError::LlmError(_) => "llm",
            BotError::TelegramError(_) => "telegram",
        }
    }
}

impl From<reqwest::Error> for BotError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_decode() {
            BotError::ParseError(error.to_string())
        } else {
            BotError::HttpError(error.to_string())
        }
    }
}

impl From<anyhow::Error> for BotError {
    fn from(error: anyhow::Error) -> Self {
        BotError::HttpError(error.to_string())
    }
}

impl From<serde_json::Error> for BotError {
    fn from(error: serde_json::Error) -> Self {
        BotError::ParseError(error.to_string())
    }
}
