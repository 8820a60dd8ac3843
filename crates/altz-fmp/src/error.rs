//! Error types for FMP API client.

use altz_traits::ComputationFailure;
use thiserror::Error;

/// Errors that can occur when using the FMP API.
#[derive(Debug, Error)]
pub enum FmpError {
    /// Missing API key.
    #[error("FMP_API_KEY environment variable not set")]
    MissingApiKey,

    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// API returned an error.
    #[error("FMP API error: {0}")]
    Api(String),

    /// Rate limit exceeded.
    #[error("Rate limit exceeded. Free tier allows 250 requests/day.")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// A statement carries a date that is not `YYYY-MM-DD`.
    #[error("Invalid statement date: {0}")]
    InvalidDate(String),
}

impl From<FmpError> for ComputationFailure {
    fn from(err: FmpError) -> Self {
        match err {
            FmpError::MissingApiKey => Self::Config(err.to_string()),
            FmpError::Request(_) | FmpError::Api(_) => Self::DataFetch(err.to_string()),
            FmpError::Json(_) | FmpError::InvalidDate(_) => {
                Self::MalformedResponse(err.to_string())
            }
            FmpError::RateLimitExceeded => Self::RateLimited("fmp".to_string()),
            FmpError::SymbolNotFound(symbol) => Self::SymbolNotFound(symbol),
        }
    }
}
