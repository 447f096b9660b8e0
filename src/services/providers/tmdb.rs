/// TMDB provider
///
/// Read-only gateway over three TMDB endpoints:
/// 1. Discover: /discover/movie sorted by descending popularity (browse mode)
/// 2. Search:   /search/movie with adult content included
/// 3. Detail:   /movie/{id} with videos appended for trailer resolution
///
/// Authentication is a bearer token attached to every request. A non-OK
/// status maps to `ExternalApi`; a 200 body carrying `success: false` maps to
/// `ApiRejected` with the embedded message when one is present.
use reqwest::Client as HttpClient;

use crate::{
    error::{AppError, AppResult},
    models::tmdb::{TmdbMovieDetail, TmdbPage},
    models::{MovieDetail, ResultPage},
    services::providers::MovieProvider,
    Config,
};

#[derive(Clone)]
pub struct TmdbProvider {
    http_client: HttpClient,
    api_token: String,
    api_url: String,
}

impl TmdbProvider {
    pub fn new(api_token: String, api_url: String) -> Self {
        Self {
            http_client: HttpClient::new(),
            api_token,
            api_url,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.tmdb_api_token.clone(), config.tmdb_api_url.clone())
    }

    async fn fetch_page(&self, path: &str, query: &[(&str, String)]) -> AppResult<ResultPage> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(query)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let page: TmdbPage = response.json().await?;
        Self::convert_page(page)
    }

    /// Maps the wire envelope, surfacing 200-level application failures
    fn convert_page(page: TmdbPage) -> AppResult<ResultPage> {
        if page.is_rejected() {
            return Err(match page.status_message {
                Some(message) => AppError::ApiRejected(message),
                None => AppError::ExternalApi(
                    "TMDB signalled failure without a message".to_string(),
                ),
            });
        }

        Ok(ResultPage {
            movies: page.results.into_iter().map(Into::into).collect(),
            total_pages: page.total_pages,
        })
    }
}

#[async_trait::async_trait]
impl MovieProvider for TmdbProvider {
    async fn discover(&self, page: u32) -> AppResult<ResultPage> {
        let result = self
            .fetch_page(
                "/discover/movie",
                &[
                    ("sort_by", "popularity.desc".to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;

        tracing::info!(
            page = page,
            results = result.movies.len(),
            total_pages = result.total_pages,
            "Discover page fetched"
        );

        Ok(result)
    }

    async fn search(&self, query: &str, page: u32) -> AppResult<ResultPage> {
        if query.trim().is_empty() {
            return Err(AppError::InvalidInput(
                "Search query cannot be empty".to_string(),
            ));
        }

        let result = self
            .fetch_page(
                "/search/movie",
                &[
                    ("query", query.to_string()),
                    ("include_adult", "true".to_string()),
                    ("page", page.to_string()),
                ],
            )
            .await?;

        tracing::info!(
            query = %query,
            page = page,
            results = result.movies.len(),
            "Title search completed"
        );

        Ok(result)
    }

    async fn fetch_detail(&self, movie_id: u64) -> AppResult<MovieDetail> {
        let url = format!("{}/movie/{}", self.api_url, movie_id);

        let response = self
            .http_client
            .get(&url)
            .bearer_auth(&self.api_token)
            .query(&[("append_to_response", "videos")])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalApi(format!(
                "TMDB returned status {}: {}",
                status, body
            )));
        }

        let detail: TmdbMovieDetail = response.json().await?;
        let detail: MovieDetail = detail.into();

        tracing::info!(
            movie_id = movie_id,
            has_trailer = detail.trailer_url.is_some(),
            "Movie detail fetched"
        );

        Ok(detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tmdb::TmdbMovie;

    fn wire_movie(id: u64, title: &str) -> TmdbMovie {
        TmdbMovie {
            id,
            title: title.to_string(),
            poster_path: None,
            vote_average: Some(7.5),
            vote_count: Some(100),
            original_language: Some("en".to_string()),
            release_date: Some("2010-07-16".to_string()),
        }
    }

    #[test]
    fn convert_page_maps_results_and_total_pages() {
        let page = TmdbPage {
            success: None,
            status_message: None,
            results: vec![wire_movie(1, "First"), wire_movie(2, "Second")],
            total_pages: 50,
        };

        let result = TmdbProvider::convert_page(page).unwrap();
        assert_eq!(result.total_pages, 50);
        assert_eq!(result.movies.len(), 2);
        assert_eq!(result.movies[0].title, "First");
    }

    #[test]
    fn convert_page_surfaces_embedded_rejection_message() {
        let page = TmdbPage {
            success: Some(false),
            status_message: Some("Invalid query".to_string()),
            results: vec![],
            total_pages: 1,
        };

        match TmdbProvider::convert_page(page) {
            Err(AppError::ApiRejected(message)) => assert_eq!(message, "Invalid query"),
            other => panic!("expected ApiRejected, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn convert_page_rejection_without_message_is_external_api_error() {
        let page = TmdbPage {
            success: Some(false),
            status_message: None,
            results: vec![],
            total_pages: 1,
        };

        assert!(matches!(
            TmdbProvider::convert_page(page),
            Err(AppError::ExternalApi(_))
        ));
    }

    #[tokio::test]
    async fn search_rejects_empty_query() {
        let provider = TmdbProvider::new("test_token".to_string(), "http://test.local".to_string());
        assert!(matches!(
            provider.search("   ", 1).await,
            Err(AppError::InvalidInput(_))
        ));
    }
}
