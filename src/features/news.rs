//! The `news` and `latest` commands: fetch, summarize, format.

use async_trait::async_trait;
use futures::future::join_all;
use std::sync::Arc;
use tracing::info;

use super::fetch::ArticleFetcher;
use super::format::{format_digest, format_reply};
use super::summarize::Summarizer;
use crate::core::reply::{Reply, ReplyFormat, ReplySink, deliver};
use crate::dispatcher::{CommandContext, CommandHandler};

pub const NEWS_USAGE_MESSAGE: &str =
    "Please tell me what to look for, e.g. /news ISRO or /news climate change";

pub const NOT_FOUND_MESSAGE: &str = "Sorry, I couldn't find any news about this topic 😢";

pub const LATEST_UNAVAILABLE_MESSAGE: &str = "Sorry, couldn't fetch the news 😢";

/// Headlines summarized by `/latest`.
pub const LATEST_ARTICLE_COUNT: usize = 3;

const LATEST_TOPIC: &str = "today's top headlines";

#[must_use]
pub fn searching_message(topic: &str) -> String {
    format!("🔎 Searching the latest news about \"{topic}\"...")
}

/// Fetch → summarize → format, shared by the news commands.
pub struct NewsPipeline {
    fetcher: ArticleFetcher,
    summarizer: Summarizer,
}

impl NewsPipeline {
    #[must_use]
    pub fn new(fetcher: ArticleFetcher, summarizer: Summarizer) -> Self {
        Self {
            fetcher,
            summarizer,
        }
    }

    /// Produces the reply for one topic: a formatted article, or the
    /// not-found message when no article could be fetched.
    pub async fn run(&self, topic: &str) -> Reply {
        let Some(article) = self.fetcher.fetch(topic).await else {
            return Reply::plain(NOT_FOUND_MESSAGE);
        };

        info!("Fetched article {:?} for {:?}", article.title, topic);
        let summary = self.summarizer.summarize(article.body(), topic).await;
        Reply::html(format_reply(&article, &summary))
    }

    /// Produces a digest of the current headlines, summarized concurrently.
    pub async fn latest(&self, limit: usize) -> Reply {
        let articles = self.fetcher.fetch_latest(limit).await;
        if articles.is_empty() {
            return Reply::plain(LATEST_UNAVAILABLE_MESSAGE);
        }

        let summaries = join_all(
            articles
                .iter()
                .map(|a| self.summarizer.summarize(a.body(), LATEST_TOPIC)),
        )
        .await;

        let items: Vec<_> = articles.into_iter().zip(summaries).collect();
        Reply::html(format_digest(&items))
    }
}

/// `/news <topic>`
pub struct NewsCommand {
    pipeline: Arc<NewsPipeline>,
}

impl NewsCommand {
    #[must_use]
    pub fn new(pipeline: Arc<NewsPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl CommandHandler for NewsCommand {
    async fn handle(&self, ctx: &CommandContext, sink: &dyn ReplySink) {
        let Some(topic) = ctx.command.topic() else {
            info!("News command without a topic");
            deliver(sink, ctx.chat_id, NEWS_USAGE_MESSAGE, ReplyFormat::Plain).await;
            return;
        };

        deliver(
            sink,
            ctx.chat_id,
            &searching_message(&topic),
            ReplyFormat::Plain,
        )
        .await;

        let reply = self.pipeline.run(&topic).await;
        deliver(sink, ctx.chat_id, &reply.text, reply.format).await;
    }
}

/// `/latest`
pub struct LatestCommand {
    pipeline: Arc<NewsPipeline>,
}

impl LatestCommand {
    #[must_use]
    pub fn new(pipeline: Arc<NewsPipeline>) -> Self {
        Self { pipeline }
    }
}

#[async_trait]
impl CommandHandler for LatestCommand {
    async fn handle(&self, ctx: &CommandContext, sink: &dyn ReplySink) {
        let reply = self.pipeline.latest(LATEST_ARTICLE_COUNT).await;
        deliver(sink, ctx.chat_id, &reply.text, reply.format).await;
    }
}
