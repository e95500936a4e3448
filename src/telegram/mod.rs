//! All Telegram-specific functionality

pub mod client;
pub mod runner;

// Re-export main types for convenience
pub use client::TelegramClient;
pub use runner::run_polling;
