/// Redis-backed search log
///
/// Counter lives in one sorted set (member = normalized term, score = count);
/// the poster snapshot is a plain key written once with SET NX so the first
/// recorded movie's poster sticks, matching the document-store behavior.
use redis::AsyncCommands;
use redis::Client;

use crate::{
    error::{AppError, AppResult},
    models::{MovieSummary, TrendingEntry},
    services::analytics::{normalize_term, SearchAnalytics},
};

const TRENDING_KEY: &str = "searchlog:trending";

#[derive(Clone)]
pub struct RedisSearchLog {
    redis_client: Client,
    image_base: String,
}

impl RedisSearchLog {
    pub fn new(redis_client: Client, image_base: String) -> Self {
        Self {
            redis_client,
            image_base,
        }
    }

    pub fn connect(redis_url: &str, image_base: String) -> AppResult<Self> {
        let client = Client::open(redis_url).map_err(AppError::from)?;
        Ok(Self::new(client, image_base))
    }

    fn poster_key(term: &str) -> String {
        format!("searchlog:poster:{}", term)
    }
}

#[async_trait::async_trait]
impl SearchAnalytics for RedisSearchLog {
    async fn record_search(&self, term: &str, movie: &MovieSummary) -> AppResult<()> {
        let term = normalize_term(term);
        if term.is_empty() {
            return Err(AppError::InvalidInput(
                "Cannot record an empty search term".to_string(),
            ));
        }

        let mut conn = self
            .redis_client
            .get_multiplexed_async_connection()
            .await?;

        let count: f64 = conn.zincr(TRENDING_KEY, &term, 1).await?;

        if let Some(poster_url) = movie.poster_url(&self.image_base) {
            let _: bool = conn.set_nx(Self::poster_key(&term), poster_url).await?;
        }

        tracing::debug!(term = %term, count = count as u64, "Search recorded");
        Ok(())
    }

    async fn trending(&self, limit: usize) -> AppResult<Vec<TrendingEntry>> {
        if limit == 0 {
            return Ok(Vec::new());
        }

        let mut conn = self
            .redis_client
            .get_multiplexed_async_connection()
            .await?;

        let ranked: Vec<(String, u64)> = conn
            .zrevrange_withscores(TRENDING_KEY, 0, limit as isize - 1)
            .await?;

        let mut entries = Vec::with_capacity(ranked.len());
        for (term, count) in ranked {
            let poster_url: Option<String> = conn.get(Self::poster_key(&term)).await?;
            entries.push(TrendingEntry {
                id: term.clone(),
                search_term: term,
                count,
                poster_url,
                updated_at: None,
            });
        }

        Ok(entries)
    }
}
