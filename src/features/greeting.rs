use async_trait::async_trait;

use crate::core::reply::{ReplyFormat, ReplySink, deliver};
use crate::dispatcher::{CommandContext, CommandHandler};

pub const WELCOME_MESSAGE: &str = "Hey there! 👋 I'm your AI News Bot.\n\
    Type /news <topic> to get a summarized article, or /latest for today's headlines.";

pub const HELP_MESSAGE: &str = "Here's what I can do:\n\
    /news <topic> - find a recent article about a topic and summarize it\n\
    /latest - summarize today's top headlines\n\
    /help - show this message";

/// Replies with a fixed text, ignoring any arguments.
pub struct StaticReplyCommand {
    text: &'static str,
}

impl StaticReplyCommand {
    #[must_use]
    pub fn welcome() -> Self {
        Self {
            text: WELCOME_MESSAGE,
        }
    }

    #[must_use]
    pub fn help() -> Self {
        Self { text: HELP_MESSAGE }
    }
}

#[async_trait]
impl CommandHandler for StaticReplyCommand {
    async fn handle(&self, ctx: &CommandContext, sink: &dyn ReplySink) {
        deliver(sink, ctx.chat_id, self.text, ReplyFormat::Plain).await;
    }
}
