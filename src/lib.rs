//! NewsBot - A Telegram chatbot that finds news on a topic and summarizes it.
//!
//! A user sends `/news <topic>`; the bot searches a news API for a matching
//! article, asks an LLM for a short summary, and replies with the title,
//! summary and link.
//!
//! # Architecture
//!
//! The system uses:
//! - A [`dispatcher::CommandDispatcher`] that routes each chat command to a handler
//! - [`features::fetch::ArticleFetcher`] over a [`news::NewsProvider`]
//! - [`features::summarize::Summarizer`] over an [`ai::TextGenerator`]
//! - reqwest for every outbound HTTP call
//! - Tokio for async runtime, one task per incoming command
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use newsbot::core::config::AppConfig;
//! use newsbot::dispatcher::CommandDispatcher;
//! use newsbot::telegram::{TelegramClient, run_polling};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     newsbot::setup_logging();
//!
//!     let config = AppConfig::from_env()?;
//!     let pipeline = newsbot::build_pipeline(&config);
//!
//!     let mut dispatcher = CommandDispatcher::new(config.bot_username.clone());
//!     newsbot::features::register_commands(&mut dispatcher, &pipeline);
//!
//!     let telegram = Arc::new(TelegramClient::new(
//!         config.bot_token.clone(),
//!         config.telegram_api_url.clone(),
//!     ));
//!     run_polling(telegram, Arc::new(dispatcher)).await;
//!     Ok(())
//! }
//! ```

// Module declarations
pub mod ai;
pub mod core;
pub mod dispatcher;
pub mod errors;
pub mod features;
pub mod news;
pub mod telegram;

use std::sync::Arc;

pub use errors::BotError;

use crate::ai::LlmClient;
use crate::core::config::AppConfig;
use crate::features::fetch::ArticleFetcher;
use crate::features::news::NewsPipeline;
use crate::features::summarize::Summarizer;
use crate::news::NewsDataClient;

/// Configure structured logging with JSON format.
///
/// The level is taken from `RUST_LOG` and defaults to `info`. Calling this more
/// than once is harmless.
///
/// # Example
///
/// ```
/// newsbot::setup_logging();
/// ```
pub fn setup_logging() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let fmt_layer = tracing_subscriber::fmt::layer().json().with_target(true);

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init();
}

/// Wires the production news and LLM clients into a [`NewsPipeline`].
#[must_use]
pub fn build_pipeline(config: &AppConfig) -> Arc<NewsPipeline> {
    let news_client = NewsDataClient::new(
        config.news_api_key.clone(),
        config.news_api_url.clone(),
        config.http_timeout,
    );
    let llm_client = LlmClient::new(
        config.openai_api_key.clone(),
        config.openai_org_id.clone(),
        config.model_name(),
        config.openai_api_url.clone(),
        config.http_timeout,
    );

    let fetcher = ArticleFetcher::new(
        Arc::new(news_client),
        config.news_language.clone(),
        config.news_country.clone(),
    );
    let summarizer = Summarizer::new(Arc::new(llm_client));

    Arc::new(NewsPipeline::new(fetcher, summarizer))
}
