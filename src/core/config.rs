use std::env;
use std::time::Duration;

pub const DEFAULT_NEWS_API_URL: &str = "https://newsdata.io/api/1/latest";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/responses";
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5-mini";
pub const DEFAULT_NEWS_LANGUAGE: &str = "en";
pub const DEFAULT_NEWS_COUNTRY: &str = "in";

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bot_token: String,
    pub bot_username: Option<String>,
    pub news_api_key: String,
    pub news_api_url: String,
    pub news_language: String,
    pub news_country: String,
    pub openai_api_key: String,
    pub openai_api_url: String,
    pub openai_org_id: Option<String>,
    pub openai_model: Option<String>,
    pub telegram_api_url: String,
    /// Applied to every outbound provider request when set. Unset means the
    /// HTTP client's own default (no overall deadline).
    pub http_timeout: Option<Duration>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, String> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so it can be exercised
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, String>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .ok_or_else(|| format!("{key}: environment variable not found"))
        };
        let or_default = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let http_timeout = match lookup("HTTP_TIMEOUT_SECS") {
            Some(raw) if !raw.trim().is_empty() => {
                let secs = raw
                    .trim()
                    .parse::<u64>()
                    .map_err(|e| format!("HTTP_TIMEOUT_SECS: {e}"))?;
                Some(Duration::from_secs(secs))
            }
            _ => None,
        };

        Ok(Self {
            bot_token: required("BOT_TOKEN")?,
            bot_username: lookup("BOT_USERNAME")
                .map(|u| u.trim().trim_start_matches('@').to_string())
                .filter(|u| !u.is_empty()),
            news_api_key: required("NEWS_API_KEY")?,
            news_api_url: or_default("NEWS_API_URL", DEFAULT_NEWS_API_URL),
            news_language: or_default("NEWS_LANGUAGE", DEFAULT_NEWS_LANGUAGE),
            news_country: or_default("NEWS_COUNTRY", DEFAULT_NEWS_COUNTRY),
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_api_url: or_default("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
            openai_org_id: lookup("OPENAI_ORG_ID"),
            openai_model: lookup("OPENAI_MODEL"),
            telegram_api_url: or_default("TELEGRAM_API_URL", DEFAULT_TELEGRAM_API_URL),
            http_timeout,
        })
    }

    #[must_use]
    pub fn model_name(&self) -> String {
        self.openai_model
            .clone()
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string())
    }
}
