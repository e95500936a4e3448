use std::sync::Arc;
use tracing::{info, warn};

use crate::ai::{TextGenerator, build_summary_prompt};

/// Returned instead of a summary when the article carried no text.
pub const NOTHING_TO_SUMMARIZE_MESSAGE: &str = "There was no article text to summarize.";

/// Returned instead of a summary when the generative-text provider failed.
pub const SUMMARY_FAILURE_MESSAGE: &str =
    "Sorry, I couldn't summarize this article right now. Please try again later.";

/// Produces short article summaries; never fails past its own boundary.
#[derive(Clone)]
pub struct Summarizer {
    generator: Arc<dyn TextGenerator>,
}

impl Summarizer {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    /// Summarizes `body_text` in the context of `topic`.
    ///
    /// Always returns non-empty text: a real summary, or one of the fixed
    /// fallback messages above.
    pub async fn summarize(&self, body_text: &str, topic: &str) -> String {
        if body_text.trim().is_empty() {
            info!("Nothing to summarize for {:?}", topic);
            return NOTHING_TO_SUMMARIZE_MESSAGE.to_string();
        }

        let prompt = build_summary_prompt(body_text, topic);
        match self.generator.generate(&prompt).await {
            Ok(summary) if !summary.trim().is_empty() => summary.trim().to_string(),
            Ok(_) => {
                warn!(error_kind = "llm", "Summary for {:?} came back empty", topic);
                SUMMARY_FAILURE_MESSAGE.to_string()
            }
            Err(e) => {
                warn!(error_kind = e.kind(), "Summarization failed for {:?}: {}", topic, e);
                SUMMARY_FAILURE_MESSAGE.to_string()
            }
        }
    }
}
