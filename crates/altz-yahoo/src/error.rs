//! Error types for the Yahoo Finance client.

use altz_traits::ComputationFailure;
use thiserror::Error;

/// Errors that can occur when using Yahoo Finance.
#[derive(Debug, Error)]
pub enum YahooError {
    /// HTTP request failed.
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("Failed to parse JSON response: {0}")]
    Json(#[from] serde_json::Error),

    /// Yahoo returned an error object or an unexpected status.
    #[error("Yahoo API error: {0}")]
    Api(String),

    /// Too many requests.
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Symbol not found.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The response lacks a module that was requested.
    #[error("Module '{module}' missing from response for {symbol}")]
    MissingModule {
        /// Ticker symbol.
        symbol: String,
        /// quoteSummary module name.
        module: &'static str,
    },

    /// A statement has no usable `endDate`.
    #[error("Statement without a valid end date")]
    InvalidDate,

    /// The crumb handshake failed.
    #[error("Could not obtain crumb: {0}")]
    Crumb(String),
}

impl From<YahooError> for ComputationFailure {
    fn from(err: YahooError) -> Self {
        match err {
            YahooError::Request(_) | YahooError::Api(_) | YahooError::Crumb(_) => {
                Self::DataFetch(err.to_string())
            }
            YahooError::Json(_) | YahooError::MissingModule { .. } | YahooError::InvalidDate => {
                Self::MalformedResponse(err.to_string())
            }
            YahooError::RateLimitExceeded => Self::RateLimited("yahoo".to_string()),
            YahooError::SymbolNotFound(symbol) => Self::SymbolNotFound(symbol),
        }
    }
}
