//! Fake providers and transport shared by the integration tests.
#![allow(dead_code)]

use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use newsbot::ai::TextGenerator;
use newsbot::core::reply::{ReplyFormat, ReplySink};
use newsbot::dispatcher::CommandDispatcher;
use newsbot::errors::BotError;
use newsbot::features::fetch::ArticleFetcher;
use newsbot::features::news::NewsPipeline;
use newsbot::features::register_commands;
use newsbot::features::summarize::Summarizer;
use newsbot::news::{NewsProvider, NewsQuery};

/// Records every reply instead of sending it.
#[derive(Default)]
pub struct RecordingSink {
    sent: Mutex<Vec<(i64, String, ReplyFormat)>>,
}

impl RecordingSink {
    pub fn sent(&self) -> Vec<(i64, String, ReplyFormat)> {
        self.sent.lock().unwrap().clone()
    }

    pub fn texts_for(&self, chat_id: i64) -> Vec<String> {
        self.sent()
            .into_iter()
            .filter(|(id, _, _)| *id == chat_id)
            .map(|(_, text, _)| text)
            .collect()
    }

    /// Waits until `predicate` holds for the recorded replies, or panics after `limit`.
    pub async fn wait_for<F>(&self, limit: Duration, predicate: F)
    where
        F: Fn(&[(i64, String, ReplyFormat)]) -> bool,
    {
        tokio::time::timeout(limit, async {
            loop {
                if predicate(self.sent().as_slice()) {
                    return;
                }
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("expected replies did not arrive in time");
    }
}

#[async_trait]
impl ReplySink for RecordingSink {
    async fn send_text(
        &self,
        chat_id: i64,
        text: &str,
        format: ReplyFormat,
    ) -> Result<(), BotError> {
        self.sent
            .lock()
            .unwrap()
            .push((chat_id, text.to_string(), format));
        Ok(())
    }
}

/// A sink whose every send fails.
pub struct FailingSink;

#[async_trait]
impl ReplySink for FailingSink {
    async fn send_text(&self, _: i64, _: &str, _: ReplyFormat) -> Result<(), BotError> {
        Err(BotError::TelegramError("chat not found".to_string()))
    }
}

pub enum NewsBehavior {
    Respond(Value),
    Fail,
}

/// News provider returning a fixed body, stalling forever for chosen topics.
pub struct FakeNews {
    behavior: NewsBehavior,
    stall_topics: Vec<String>,
    pub calls: AtomicUsize,
    pub queries: Mutex<Vec<NewsQuery>>,
}

impl FakeNews {
    pub fn new(behavior: NewsBehavior) -> Self {
        Self {
            behavior,
            stall_topics: Vec::new(),
            calls: AtomicUsize::new(0),
            queries: Mutex::new(Vec::new()),
        }
    }

    pub fn stalling_on(mut self, topic: &str) -> Self {
        self.stall_topics.push(topic.to_string());
        self
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl NewsProvider for FakeNews {
    async fn search(&self, query: &NewsQuery) -> Result<Value, BotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.queries.lock().unwrap().push(query.clone());

        if let Some(q) = &query.query
            && self.stall_topics.contains(q)
        {
            std::future::pending::<()>().await;
        }

        match &self.behavior {
            NewsBehavior::Respond(body) => Ok(body.clone()),
            NewsBehavior::Fail => Err(BotError::HttpError("connection refused".to_string())),
        }
    }
}

pub enum LlmBehavior {
    Respond(String),
    Fail,
    Stall,
}

/// Generative-text provider with a scripted outcome.
pub struct FakeLlm {
    behavior: LlmBehavior,
    pub calls: AtomicUsize,
    pub prompts: Mutex<Vec<String>>,
}

impl FakeLlm {
    pub fn new(behavior: LlmBehavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for FakeLlm {
    async fn generate(&self, prompt: &str) -> Result<String, BotError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.behavior {
            LlmBehavior::Respond(text) => Ok(text.clone()),
            LlmBehavior::Fail => Err(BotError::LlmError("HTTP 429: quota exceeded".to_string())),
            LlmBehavior::Stall => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}

pub fn isro_response() -> Value {
    json!({
        "status": "success",
        "totalResults": 1,
        "results": [{
            "title": "ISRO launches satellite",
            "content": "The Indian Space Research Organisation launched a satellite on Monday.",
            "description": "A launch.",
            "link": "https://example.com/1"
        }]
    })
}

pub fn fetcher(news: &Arc<FakeNews>) -> ArticleFetcher {
    let provider: Arc<dyn NewsProvider> = news.clone();
    ArticleFetcher::new(provider, "en".to_string(), "in".to_string())
}

pub fn summarizer(llm: &Arc<FakeLlm>) -> Summarizer {
    let generator: Arc<dyn TextGenerator> = llm.clone();
    Summarizer::new(generator)
}

pub fn pipeline(news: &Arc<FakeNews>, llm: &Arc<FakeLlm>) -> Arc<NewsPipeline> {
    Arc::new(NewsPipeline::new(fetcher(news), summarizer(llm)))
}

pub fn dispatcher(news: &Arc<FakeNews>, llm: &Arc<FakeLlm>) -> Arc<CommandDispatcher> {
    let mut dispatcher = CommandDispatcher::new(Some("NewsyBot".to_string()));
    register_commands(&mut dispatcher, &pipeline(news, llm));
    Arc::new(dispatcher)
}
