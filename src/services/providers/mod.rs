/// Movie metadata provider abstraction
///
/// One trait in front of the upstream metadata API so the controller can be
/// driven by fakes in tests. Every call is single-attempt and stateless; no
/// retry and no caching of result pages.
use crate::{
    error::AppResult,
    models::{MovieDetail, ResultPage},
};

pub mod tmdb;

pub use tmdb::TmdbProvider;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieProvider: Send + Sync {
    /// Browse mode: popular movies, most popular first, one page at a time
    async fn discover(&self, page: u32) -> AppResult<ResultPage>;

    /// Title search, adult content included, one page at a time
    async fn search(&self, query: &str, page: u32) -> AppResult<ResultPage>;

    /// Full detail for one movie with its video list attached
    async fn fetch_detail(&self, movie_id: u64) -> AppResult<MovieDetail>;
}
