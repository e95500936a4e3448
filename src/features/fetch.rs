use std::sync::Arc;
use tracing::{info, warn};

use crate::core::models::Article;
use crate::news::{NewsProvider, NewsQuery, article_from_entry, result_entries};

/// Looks up news articles for a topic within a fixed locale.
#[derive(Clone)]
pub struct ArticleFetcher {
    provider: Arc<dyn NewsProvider>,
    language: String,
    country: String,
}

impl ArticleFetcher {
    #[must_use]
    pub fn new(provider: Arc<dyn NewsProvider>, language: String, country: String) -> Self {
        Self {
            provider,
            language,
            country,
        }
    }

    fn query(&self, topic: Option<&str>) -> NewsQuery {
        NewsQuery {
            query: topic.map(ToString::to_string),
            language: self.language.clone(),
            country: self.country.clone(),
        }
    }

    /// Returns the first search result for `topic`, or `None` on any failure.
    pub async fn fetch(&self, topic: &str) -> Option<Article> {
        let body = match self.provider.search(&self.query(Some(topic))).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error_kind = e.kind(), "News search failed for {:?}: {}", topic, e);
                return None;
            }
        };

        let entries = match result_entries(&body) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(error_kind = e.kind(), "Unusable news response for {:?}: {}", topic, e);
                return None;
            }
        };

        let Some(first) = entries.first() else {
            info!("No news results for {:?}", topic);
            return None;
        };

        let article = article_from_entry(first);
        if article.title.is_empty() {
            warn!(error_kind = "parse", "First news result for {:?} has no title", topic);
        }
        Some(article)
    }

    /// Returns up to `limit` of the current headlines, empty on any failure.
    pub async fn fetch_latest(&self, limit: usize) -> Vec<Article> {
        let body = match self.provider.search(&self.query(None)).await {
            Ok(body) => body,
            Err(e) => {
                warn!(error_kind = e.kind(), "Headline search failed: {}", e);
                return Vec::new();
            }
        };

        match result_entries(&body) {
            Ok(entries) => entries
                .iter()
                .take(limit)
                .map(article_from_entry)
                .collect(),
            Err(e) => {
                warn!(error_kind = e.kind(), "Unusable headline response: {}", e);
                Vec::new()
            }
        }
    }
}
