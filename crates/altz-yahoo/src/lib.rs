//! Yahoo Finance data source for altz.
//!
//! Reads the `balanceSheetHistory`, `incomeStatementHistory` and `price`
//! modules of the `quoteSummary` endpoint. No API key is needed, but Yahoo
//! binds requests to a cookie session and crumb, which the client obtains
//! once and reuses for every later request.
//!
//! # Usage
//!
//! ```rust,ignore
//! use altz_traits::FinancialDataSource;
//! use altz_yahoo::YahooClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = YahooClient::new()?;
//!     let statements = client.annual_statements("MSFT").await?;
//!     let market_cap = client.market_capitalization("MSFT").await?;
//!     Ok(())
//! }
//! ```

mod client;
mod error;
mod types;

pub use client::{YAHOO_BASE_URL, YahooClient};
pub use error::YahooError;
pub use types::*;

/// Result type for Yahoo operations.
pub type Result<T> = std::result::Result<T, YahooError>;
