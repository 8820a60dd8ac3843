//! Financial Modeling Prep (FMP) data source for altz.
//!
//! This crate fetches annual balance sheets, income statements and quotes
//! from the [Financial Modeling Prep](https://financialmodelingprep.com/) API
//! and exposes them through [`altz_traits::FinancialDataSource`].
//!
//! # Usage
//!
//! ```rust,ignore
//! use altz_fmp::{FmpClient, Period};
//! use altz_traits::FinancialDataSource;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     // Raw statements
//!     let balance = client.balance_sheet("AAPL", Period::Annual, Some(5)).await?;
//!
//!     // Latest annual period, paired by date
//!     let statements = client.annual_statements("AAPL").await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::{FMP_BASE_URL, FmpClient};
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
