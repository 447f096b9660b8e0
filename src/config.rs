use serde::Deserialize;

/// Application configuration loaded from environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// TMDB API bearer token (required — a missing token is a startup error)
    pub tmdb_api_token: String,

    /// TMDB API base URL
    #[serde(default = "default_tmdb_api_url")]
    pub tmdb_api_url: String,

    /// TMDB image CDN base URL
    #[serde(default = "default_tmdb_image_url")]
    pub tmdb_image_url: String,

    /// Appwrite REST endpoint for the search-counter store
    #[serde(default = "default_appwrite_endpoint")]
    pub appwrite_endpoint: String,

    /// Appwrite project ID
    #[serde(default)]
    pub appwrite_project_id: Option<String>,

    /// Appwrite API key
    #[serde(default)]
    pub appwrite_api_key: Option<String>,

    /// Appwrite database holding the search-counter collection
    #[serde(default)]
    pub appwrite_database_id: Option<String>,

    /// Appwrite collection holding the search-counter documents
    #[serde(default)]
    pub appwrite_collection_id: Option<String>,

    /// Redis connection URL (alternative counter backend)
    #[serde(default = "default_redis_url")]
    pub redis_url: String,

    /// Quiet period before a typed query is committed, in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u64,

    /// Maximum number of trending entries to load
    #[serde(default = "default_trending_limit")]
    pub trending_limit: usize,
}

fn default_tmdb_api_url() -> String {
    "https://api.themoviedb.org/3".to_string()
}

fn default_tmdb_image_url() -> String {
    "https://image.tmdb.org/t/p".to_string()
}

fn default_appwrite_endpoint() -> String {
    "https://cloud.appwrite.io/v1".to_string()
}

fn default_redis_url() -> String {
    "redis://localhost:6379".to_string()
}

fn default_debounce_ms() -> u64 {
    800
}

fn default_trending_limit() -> usize {
    5
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        envy::from_env::<Config>().map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))
    }
}
