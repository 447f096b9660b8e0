/// Application-level errors
///
/// The controller never lets these escape to the presentation layer as faults:
/// list-fetch errors become `RequestState::Failed`, detail and analytics
/// errors are logged and dropped.
#[derive(thiserror::Error, Debug)]
pub enum AppError {
    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("External API error: {0}")]
    ExternalApi(String),

    #[error("API rejected request: {0}")]
    ApiRejected(String),

    #[error("Analytics store error: {0}")]
    Analytics(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<redis::RedisError> for AppError {
    fn from(e: redis::RedisError) -> Self {
        AppError::Analytics(e.to_string())
    }
}

pub type AppResult<T> = Result<T, AppError>;
