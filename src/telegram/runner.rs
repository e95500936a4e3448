use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use super::client::{TelegramClient, Update};
use crate::core::reply::ReplySink;
use crate::dispatcher::CommandDispatcher;

/// Pause after a failed `getUpdates` before polling again.
const POLL_ERROR_BACKOFF: Duration = Duration::from_secs(3);

/// Offset that acknowledges every update in `updates`.
#[must_use]
pub fn next_offset(current: Option<i64>, updates: &[Update]) -> Option<i64> {
    updates
        .iter()
        .map(|u| u.update_id + 1)
        .max()
        .max(current)
}

/// Polls Telegram forever, handing each message to the dispatcher on its own
/// task.
pub async fn run_polling(client: Arc<TelegramClient>, dispatcher: Arc<CommandDispatcher>) {
    let sink: Arc<dyn ReplySink> = client.clone();
    let mut offset: Option<i64> = None;
    info!("Bot is running...");

    loop {
        let updates = match client.get_updates(offset).await {
            Ok(updates) => updates,
            Err(e) => {
                error!(error_kind = e.kind(), "Failed to poll updates: {}", e);
                tokio::time::sleep(POLL_ERROR_BACKOFF).await;
                continue;
            }
        };

        offset = next_offset(offset, &updates);

        for update in updates {
            if let Some(message) = update.into_incoming() {
                dispatcher.spawn_dispatch(message, Arc::clone(&sink));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn update(id: i64) -> Update {
        serde_json::from_value(json!({ "update_id": id })).unwrap()
    }

    #[test]
    fn test_next_offset_advances_past_highest_update() {
        assert_eq!(next_offset(None, &[update(3), update(9), update(4)]), Some(10));
    }

    #[test]
    fn test_next_offset_keeps_current_when_empty() {
        assert_eq!(next_offset(Some(5), &[]), Some(5));
        assert_eq!(next_offset(None, &[]), None);
    }
}
