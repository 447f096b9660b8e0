pub mod config;
pub mod error;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use models::{MovieDetail, MovieSummary, RequestState, ResultPage, TrendingEntry};
pub use services::analytics::{
    AppwriteSearchLog, InMemorySearchLog, RedisSearchLog, SearchAnalytics,
};
pub use services::providers::{MovieProvider, TmdbProvider};
pub use services::search_controller::{ControllerOptions, SearchController, ViewState};
