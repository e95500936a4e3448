//! News search: the provider client and response parsing

pub mod client;
pub mod parse;

// Re-export main types for convenience
pub use client::{NewsDataClient, NewsProvider, NewsQuery};
pub use parse::{article_from_entry, result_entries};
