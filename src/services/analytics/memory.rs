/// In-memory search log
///
/// Same contract as the hosted backends without any network. Used by the test
/// suite and embeddable when no analytics store is configured.
use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{MovieSummary, TrendingEntry},
    services::analytics::{normalize_term, SearchAnalytics},
};

#[derive(Debug, Clone)]
struct CounterEntry {
    id: Uuid,
    count: u64,
    poster_url: Option<String>,
    updated_at: DateTime<Utc>,
}

#[derive(Default)]
pub struct InMemorySearchLog {
    counters: Mutex<HashMap<String, CounterEntry>>,
    image_base: String,
}

impl InMemorySearchLog {
    pub fn new(image_base: String) -> Self {
        Self {
            counters: Mutex::new(HashMap::new()),
            image_base,
        }
    }

    /// Current count for a term, `None` when it was never recorded
    pub fn count_of(&self, term: &str) -> Option<u64> {
        let counters = self.counters.lock().expect("search log mutex poisoned");
        counters.get(&normalize_term(term)).map(|entry| entry.count)
    }

    /// Number of distinct counter documents
    pub fn len(&self) -> usize {
        self.counters.lock().expect("search log mutex poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait::async_trait]
impl SearchAnalytics for InMemorySearchLog {
    async fn record_search(&self, term: &str, movie: &MovieSummary) -> AppResult<()> {
        let term = normalize_term(term);
        if term.is_empty() {
            return Err(AppError::InvalidInput(
                "Cannot record an empty search term".to_string(),
            ));
        }

        let mut counters = self.counters.lock().expect("search log mutex poisoned");
        match counters.get_mut(&term) {
            Some(entry) => {
                entry.count += 1;
                entry.updated_at = Utc::now();
            }
            None => {
                counters.insert(
                    term,
                    CounterEntry {
                        id: Uuid::new_v4(),
                        count: 1,
                        poster_url: movie.poster_url(&self.image_base),
                        updated_at: Utc::now(),
                    },
                );
            }
        }

        Ok(())
    }

    async fn trending(&self, limit: usize) -> AppResult<Vec<TrendingEntry>> {
        let counters = self.counters.lock().expect("search log mutex poisoned");

        let mut entries: Vec<TrendingEntry> = counters
            .iter()
            .map(|(term, entry)| TrendingEntry {
                id: entry.id.to_string(),
                search_term: term.clone(),
                count: entry.count,
                poster_url: entry.poster_url.clone(),
                updated_at: Some(entry.updated_at),
            })
            .collect();

        // Descending by count, term as a stable tie-break
        entries.sort_by(|a, b| {
            b.count
                .cmp(&a.count)
                .then_with(|| a.search_term.cmp(&b.search_term))
        });
        entries.truncate(limit);

        Ok(entries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn movie(id: u64, poster: Option<&str>) -> MovieSummary {
        MovieSummary {
            id,
            title: format!("Movie {}", id),
            poster_path: poster.map(String::from),
            vote_average: Some(7.0),
            vote_count: Some(10),
            original_language: "en".to_string(),
            release_date: None,
        }
    }

    fn test_log() -> InMemorySearchLog {
        InMemorySearchLog::new("https://image.tmdb.org/t/p".to_string())
    }

    #[tokio::test]
    async fn repeated_records_increment_a_single_counter() {
        let log = test_log();

        for _ in 0..3 {
            log.record_search("batman", &movie(1, None)).await.unwrap();
        }

        assert_eq!(log.count_of("batman"), Some(3));
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn records_merge_across_case_and_whitespace() {
        let log = test_log();

        log.record_search("Batman", &movie(1, None)).await.unwrap();
        log.record_search("  batman ", &movie(1, None)).await.unwrap();

        assert_eq!(log.count_of("batman"), Some(2));
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn poster_snapshot_sticks_to_first_record() {
        let log = test_log();

        log.record_search("dune", &movie(1, Some("/first.jpg")))
            .await
            .unwrap();
        log.record_search("dune", &movie(2, Some("/second.jpg")))
            .await
            .unwrap();

        let trending = log.trending(5).await.unwrap();
        assert_eq!(
            trending[0].poster_url.as_deref(),
            Some("https://image.tmdb.org/t/p/w500/first.jpg")
        );
    }

    #[tokio::test]
    async fn trending_orders_by_count_descending_and_caps_at_limit() {
        let log = test_log();

        for (term, hits) in [("alpha", 1), ("beta", 5), ("gamma", 3), ("delta", 2), ("epsilon", 4), ("zeta", 6)] {
            for _ in 0..hits {
                log.record_search(term, &movie(1, None)).await.unwrap();
            }
        }

        let trending = log.trending(5).await.unwrap();
        assert_eq!(trending.len(), 5);

        let terms: Vec<&str> = trending.iter().map(|e| e.search_term.as_str()).collect();
        assert_eq!(terms, vec!["zeta", "beta", "epsilon", "gamma", "delta"]);

        let counts: Vec<u64> = trending.iter().map(|e| e.count).collect();
        assert!(counts.windows(2).all(|pair| pair[0] >= pair[1]));
    }

    #[tokio::test]
    async fn empty_term_is_rejected() {
        let log = test_log();
        assert!(matches!(
            log.record_search("   ", &movie(1, None)).await,
            Err(AppError::InvalidInput(_))
        ));
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn entries_have_stable_distinct_ids() {
        let log = test_log();

        log.record_search("first", &movie(1, None)).await.unwrap();
        log.record_search("second", &movie(2, None)).await.unwrap();

        let before = log.trending(5).await.unwrap();
        log.record_search("first", &movie(1, None)).await.unwrap();
        let after = log.trending(5).await.unwrap();

        let id_of = |list: &[TrendingEntry], term: &str| {
            list.iter()
                .find(|e| e.search_term == term)
                .map(|e| e.id.clone())
                .unwrap()
        };

        assert_eq!(id_of(&before, "first"), id_of(&after, "first"));
        assert_ne!(id_of(&before, "first"), id_of(&before, "second"));
    }
}
