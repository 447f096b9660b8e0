/// Appwrite-backed search log
///
/// Talks to a hosted Appwrite document collection over REST. One document per
/// normalized search term with fields `{search_term, count, movie_id,
/// poster_url}`; Appwrite's own `$id` doubles as the stable rendering key.
///
/// Flow per record: list documents with an equality query on the term, then
/// either PATCH count+1 on the match or POST a fresh document with count=1.
use chrono::{DateTime, Utc};
use reqwest::Client as HttpClient;
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{AppError, AppResult},
    models::{MovieSummary, TrendingEntry},
    services::analytics::{normalize_term, SearchAnalytics},
    Config,
};

#[derive(Clone)]
pub struct AppwriteSearchLog {
    http_client: HttpClient,
    endpoint: String,
    project_id: String,
    api_key: String,
    database_id: String,
    collection_id: String,
    image_base: String,
}

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<CounterDocument>,
}

#[derive(Debug, Deserialize)]
struct CounterDocument {
    #[serde(rename = "$id")]
    id: String,
    search_term: String,
    count: u64,
    #[serde(default)]
    poster_url: Option<String>,
    #[serde(rename = "$updatedAt", default)]
    updated_at: Option<DateTime<Utc>>,
}

impl AppwriteSearchLog {
    pub fn new(
        endpoint: String,
        project_id: String,
        api_key: String,
        database_id: String,
        collection_id: String,
        image_base: String,
    ) -> Self {
        Self {
            http_client: HttpClient::new(),
            endpoint,
            project_id,
            api_key,
            database_id,
            collection_id,
            image_base,
        }
    }

    /// Builds the log from config; errors when the Appwrite coordinates are
    /// incomplete instead of falling back to empty credentials
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let missing = || {
            AppError::InvalidInput(
                "Appwrite configuration incomplete: project, key, database and collection are required"
                    .to_string(),
            )
        };

        Ok(Self::new(
            config.appwrite_endpoint.clone(),
            config.appwrite_project_id.clone().ok_or_else(missing)?,
            config.appwrite_api_key.clone().ok_or_else(missing)?,
            config.appwrite_database_id.clone().ok_or_else(missing)?,
            config.appwrite_collection_id.clone().ok_or_else(missing)?,
            config.tmdb_image_url.clone(),
        ))
    }

    fn documents_url(&self) -> String {
        format!(
            "{}/databases/{}/collections/{}/documents",
            self.endpoint, self.database_id, self.collection_id
        )
    }

    fn request(&self, builder: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        builder
            .header("X-Appwrite-Project", &self.project_id)
            .header("X-Appwrite-Key", &self.api_key)
    }

    async fn find_counter(&self, term: &str) -> AppResult<Option<CounterDocument>> {
        let query = json!({
            "method": "equal",
            "attribute": "search_term",
            "values": [term],
        });

        let response = self
            .request(self.http_client.get(self.documents_url()))
            .query(&[("queries[]", query.to_string())])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Analytics(format!(
                "Appwrite list returned status {}: {}",
                status, body
            )));
        }

        let list: DocumentList = response.json().await?;
        Ok(list.documents.into_iter().next())
    }
}

#[async_trait::async_trait]
impl SearchAnalytics for AppwriteSearchLog {
    async fn record_search(&self, term: &str, movie: &MovieSummary) -> AppResult<()> {
        let term = normalize_term(term);
        if term.is_empty() {
            return Err(AppError::InvalidInput(
                "Cannot record an empty search term".to_string(),
            ));
        }

        let response = match self.find_counter(&term).await? {
            Some(existing) => {
                self.request(
                    self.http_client
                        .patch(format!("{}/{}", self.documents_url(), existing.id)),
                )
                .json(&json!({ "data": { "count": existing.count + 1 } }))
                .send()
                .await?
            }
            None => {
                self.request(self.http_client.post(self.documents_url()))
                    .json(&json!({
                        "documentId": "unique()",
                        "data": {
                            "search_term": term,
                            "count": 1,
                            "movie_id": movie.id,
                            "poster_url": movie.poster_url(&self.image_base),
                        },
                    }))
                    .send()
                    .await?
            }
        };

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Analytics(format!(
                "Appwrite write returned status {}: {}",
                status, body
            )));
        }

        tracing::debug!(term = %term, "Search recorded");
        Ok(())
    }

    async fn trending(&self, limit: usize) -> AppResult<Vec<TrendingEntry>> {
        let order = json!({ "method": "orderDesc", "attribute": "count" });
        let cap = json!({ "method": "limit", "values": [limit] });

        let response = self
            .request(self.http_client.get(self.documents_url()))
            .query(&[
                ("queries[]", order.to_string()),
                ("queries[]", cap.to_string()),
            ])
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Analytics(format!(
                "Appwrite list returned status {}: {}",
                status, body
            )));
        }

        let list: DocumentList = response.json().await?;
        Ok(list
            .documents
            .into_iter()
            .map(|doc| TrendingEntry {
                id: doc.id,
                search_term: doc.search_term,
                count: doc.count,
                poster_url: doc.poster_url,
                updated_at: doc.updated_at,
            })
            .collect())
    }
}
