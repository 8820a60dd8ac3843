//! Error types for Altman Z-Score computation.
//!
//! Every failure that can occur between asking a data source for a ticker's
//! statements and producing a score is folded into [`ComputationFailure`].
//! Callers that only want the fail-soft string never see these; callers that
//! need diagnostics can match on the variant.

use chrono::NaiveDate;
use thiserror::Error;

/// Umbrella error for a single score computation.
///
/// Covers missing statement fields, zero denominators, provider and network
/// errors, and malformed provider responses.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ComputationFailure {
    /// A required field is absent from a statement.
    #[error("Missing field '{field}' in {statement}")]
    MissingField {
        /// Statement the field was looked up in.
        statement: &'static str,
        /// Canonical field name.
        field: String,
    },

    /// A ratio denominator is zero.
    #[error("Division by zero: {0} is zero")]
    DivisionByZero(&'static str),

    /// An input or the resulting score is NaN or infinite.
    #[error("Non-finite value: {0}")]
    NonFinite(&'static str),

    /// The provider returned no annual periods for the symbol.
    #[error("No data available for {0}")]
    NoData(String),

    /// The income statement for the most recent balance-sheet period is missing.
    #[error("No income statement for {symbol} matching period ending {period_end}")]
    PeriodMismatch {
        /// Ticker symbol.
        symbol: String,
        /// Period end of the selected balance sheet.
        period_end: NaiveDate,
    },

    /// The provider does not know the symbol.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The provider refused the request because of rate limiting.
    #[error("Rate limit exceeded for {0}")]
    RateLimited(String),

    /// Network or HTTP level failure.
    #[error("Data fetch error: {0}")]
    DataFetch(String),

    /// The provider response could not be interpreted.
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// The data source could not be configured.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ComputationFailure {
    /// Build a [`ComputationFailure::MissingField`].
    pub fn missing_field(statement: &'static str, field: impl Into<String>) -> Self {
        Self::MissingField {
            statement,
            field: field.into(),
        }
    }
}

/// A specialized Result type for score computation.
pub type Result<T> = std::result::Result<T, ComputationFailure>;
