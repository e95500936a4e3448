//! Routes parsed chat commands to their handlers.
//!
//! Every handler owns its own error handling and finishes by sending exactly
//! one reply. [`CommandDispatcher::spawn_dispatch`] runs each dispatch on its
//! own task so a slow provider call never holds up the next incoming message.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{Instrument, debug, error, info, info_span};
use uuid::Uuid;

use crate::core::models::{Command, IncomingMessage};
use crate::core::reply::{ReplyFormat, ReplySink, deliver};

/// Sent when a handler dies before it could reply.
pub const FALLBACK_FAILURE_MESSAGE: &str =
    "Sorry, something went wrong while handling your request. Please try again later.";

/// Everything a handler knows about the command it is serving.
#[derive(Debug, Clone)]
pub struct CommandContext {
    pub correlation_id: String,
    pub chat_id: i64,
    pub user_id: Option<i64>,
    pub command: Command,
}

#[async_trait]
pub trait CommandHandler: Send + Sync {
    async fn handle(&self, ctx: &CommandContext, sink: &dyn ReplySink);
}

pub struct CommandDispatcher {
    handlers: HashMap<String, Arc<dyn CommandHandler>>,
    bot_username: Option<String>,
}

impl CommandDispatcher {
    #[must_use]
    pub fn new(bot_username: Option<String>) -> Self {
        Self {
            handlers: HashMap::new(),
            bot_username,
        }
    }

    /// Registers `handler` under `name` (without the leading slash).
    pub fn register(&mut self, name: &str, handler: Arc<dyn CommandHandler>) -> &mut Self {
        self.handlers
            .insert(name.trim_start_matches('/').to_lowercase(), handler);
        self
    }

    /// Parses and handles one message. Returns `false` when the message was
    /// not a registered command and nothing was done.
    pub async fn dispatch(&self, message: &IncomingMessage, sink: &dyn ReplySink) -> bool {
        let Some(command) = Command::parse(&message.text, self.bot_username.as_deref()) else {
            debug!("Ignoring non-command message in chat {}", message.chat_id);
            return false;
        };

        let Some(handler) = self.handlers.get(&command.name) else {
            debug!("Ignoring unregistered command /{}", command.name);
            return false;
        };

        let ctx = CommandContext {
            correlation_id: Uuid::new_v4().to_string(),
            chat_id: message.chat_id,
            user_id: message.user_id,
            command,
        };

        let span = info_span!(
            "command",
            correlation_id = %ctx.correlation_id,
            chat_id = ctx.chat_id,
            name = %ctx.command.name
        );

        async {
            info!("Handling command");
            handler.handle(&ctx, sink).await;
            info!("Command finished");
        }
        .instrument(span)
        .await;

        true
    }

    /// Dispatches on a fresh task. A panicking handler is contained and the
    /// chat receives [`FALLBACK_FAILURE_MESSAGE`] instead.
    pub fn spawn_dispatch(
        self: &Arc<Self>,
        message: IncomingMessage,
        sink: Arc<dyn ReplySink>,
    ) -> JoinHandle<()> {
        let dispatcher = Arc::clone(self);
        tokio::spawn(async move {
            let chat_id = message.chat_id;
            let handler_sink = Arc::clone(&sink);
            let task = tokio::spawn(async move {
                dispatcher.dispatch(&message, handler_sink.as_ref()).await;
            });

            if let Err(e) = task.await
                && e.is_panic()
            {
                error!("Command handler panicked in chat {}", chat_id);
                deliver(
                    sink.as_ref(),
                    chat_id,
                    FALLBACK_FAILURE_MESSAGE,
                    ReplyFormat::Plain,
                )
                .await;
            }
        })
    }
}
