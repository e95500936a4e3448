//! News-search API client module
//!
//! Issues search requests against a newsdata.io-style endpoint and hands the
//! raw JSON body back to the caller for parsing.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::errors::BotError;

/// Locale and query for one search request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    /// Free-text query. `None` asks for the latest headlines.
    pub query: Option<String>,
    pub language: String,
    pub country: String,
}

/// A news-search backend.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    /// # Errors
    ///
    /// Returns an error on transport failure, a non-2xx status, or a body
    /// that is not JSON.
    async fn search(&self, query: &NewsQuery) -> Result<Value, BotError>;
}

/// HTTP client for the news-search service
pub struct NewsDataClient {
    http: Client,
    api_key: String,
    endpoint: String,
}

impl NewsDataClient {
    #[must_use]
    pub fn new(api_key: String, endpoint: String, timeout: Option<Duration>) -> Self {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Self {
            http: builder.build().unwrap_or_else(|_| Client::new()),
            api_key,
            endpoint,
        }
    }

    fn query_params<'a>(&'a self, query: &'a NewsQuery) -> Vec<(&'static str, &'a str)> {
        let mut params = vec![
            ("apikey", self.api_key.as_str()),
            ("language", query.language.as_str()),
            ("country", query.country.as_str()),
        ];
        if let Some(q) = query.query.as_deref() {
            params.push(("q", q));
        }
        params
    }
}

#[async_trait]
impl NewsProvider for NewsDataClient {
    async fn search(&self, query: &NewsQuery) -> Result<Value, BotError> {
        debug!(
            "Searching news: query={:?} language={} country={}",
            query.query, query.language, query.country
        );

        let response = self
            .http
            .get(&self.endpoint)
            .query(&self.query_params(query))
            .send()
            .await
            // reqwest errors embed the URL, which carries the API key.
            .map_err(|e| {
                BotError::HttpError(format!("News API request failed: {}", e.without_url()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(BotError::NewsApiError(format!(
                "HTTP {}: {}",
                status.as_u16(),
                error_text.chars().take(200).collect::<String>()
            )));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| {
                BotError::ParseError(format!(
                    "Failed to parse news response: {}",
                    e.without_url()
                ))
            })
    }
}
