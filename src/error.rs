//! Errors raised while talking to the catalog API

use thiserror::Error;

/// Failure of a single catalog request.
///
/// The `Display` text is what the user sees in the error notification, so the
/// network variant carries the underlying message without any prefix.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("{0}")]
    Network(String),

    #[error("Request failed with HTTP status {0}")]
    Status(u16),

    #[error("Malformed response: {0}")]
    Decode(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        match e.status() {
            Some(status) => ApiError::Status(status.as_u16()),
            None => ApiError::Network(e.to_string()),
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(e: serde_json::Error) -> Self {
        ApiError::Decode(e.to_string())
    }
}
