//! Error model used by Klukka API client operations.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures that escape the request layer.
///
/// Application-level rejections are not errors; they surface as empty results.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("session expired, login required")]
    SessionExpired,
    #[error("request timed out: {0}")]
    Timeout(String),
    #[error("network error: {0}")]
    Network(String),
    #[error("serialization error: {0}")]
    Serialization(String),
    #[error("unexpected error: {0}")]
    Other(String),
}

impl From<reqwest::Error> for ApiError {
    /// Converts reqwest errors into semantic ApiError variants.
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            ApiError::Timeout(err.to_string())
        } else if err.is_connect() {
            ApiError::Network(err.to_string())
        } else {
            ApiError::Other(err.to_string())
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::Serialization(err.to_string())
    }
}
