use anyhow::anyhow;
use std::sync::Arc;
use tracing::{info, warn};

use newsbot::core::config::AppConfig;
use newsbot::dispatcher::CommandDispatcher;
use newsbot::telegram::{TelegramClient, run_polling};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    newsbot::setup_logging();

    let mut config = AppConfig::from_env().map_err(|e| anyhow!("Config error: {e}"))?;

    let telegram = Arc::new(TelegramClient::new(
        config.bot_token.clone(),
        config.telegram_api_url.clone(),
    ));

    if config.bot_username.is_none() {
        match telegram.get_me().await {
            Ok(me) => config.bot_username = me.username,
            Err(e) => warn!("Could not look up bot username: {}", e),
        }
    }

    let pipeline = newsbot::build_pipeline(&config);
    let mut dispatcher = CommandDispatcher::new(config.bot_username.clone());
    newsbot::features::register_commands(&mut dispatcher, &pipeline);

    info!(
        "Starting bot {} (news locale {}-{}, model {})",
        config.bot_username.as_deref().unwrap_or("<unknown>"),
        config.news_language,
        config.news_country,
        config.model_name()
    );

    run_polling(telegram, Arc::new(dispatcher)).await;
    Ok(())
}
