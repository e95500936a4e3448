pub mod fetch;
pub mod format;
pub mod greeting;
pub mod news;
pub mod summarize;

use std::sync::Arc;

use crate::dispatcher::CommandDispatcher;
use greeting::StaticReplyCommand;
use news::{LatestCommand, NewsCommand, NewsPipeline};

/// Registers every chat command the bot answers.
pub fn register_commands(dispatcher: &mut CommandDispatcher, pipeline: &Arc<NewsPipeline>) {
    dispatcher
        .register("start", Arc::new(StaticReplyCommand::welcome()))
        .register("help", Arc::new(StaticReplyCommand::help()))
        .register("news", Arc::new(NewsCommand::new(Arc::clone(pipeline))))
        .register("latest", Arc::new(LatestCommand::new(Arc::clone(pipeline))));
}
