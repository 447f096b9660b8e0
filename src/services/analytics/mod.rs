/// Search analytics gateway
///
/// Records which terms users search for and ranks them. The store keeps one
/// counter document per normalized term: created with count=1 and a poster
/// snapshot on the first search, incremented on every repeat. Nothing is ever
/// deleted. All failures on this path are swallowed by the controller.
use crate::{
    error::AppResult,
    models::{MovieSummary, TrendingEntry},
};

pub mod appwrite;
pub mod memory;
pub mod redis;

pub use appwrite::AppwriteSearchLog;
pub use memory::InMemorySearchLog;
pub use redis::RedisSearchLog;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait SearchAnalytics: Send + Sync {
    /// Increment-or-create the counter for `term`, snapshotting the poster of
    /// the chosen movie when the counter is first created
    async fn record_search(&self, term: &str, movie: &MovieSummary) -> AppResult<()>;

    /// Top `limit` search terms by count, descending
    async fn trending(&self, limit: usize) -> AppResult<Vec<TrendingEntry>>;
}

/// Canonical counter key for a search term
pub fn normalize_term(term: &str) -> String {
    term.trim().to_lowercase()
}
