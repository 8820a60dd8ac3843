//! Data source trait for fetching financial statement figures.
//!
//! A [`FinancialDataSource`] is the seam between the score calculator and a
//! market-data provider. Implementations translate the provider's response
//! into canonical [`FieldMap`](crate::FieldMap)s and report every failure as a
//! [`ComputationFailure`](crate::ComputationFailure).

use std::future::Future;

use crate::{AnnualStatements, Result};

/// A provider of annual statements and market capitalization.
///
/// Implementations must be `Send + Sync` so a calculator can be shared
/// across tasks.
///
/// # Example
///
/// ```no_run
/// use altz_traits::{AnnualStatements, FinancialDataSource, Result};
///
/// struct Fixed(AnnualStatements);
///
/// impl FinancialDataSource for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     async fn annual_statements(&self, _symbol: &str) -> Result<AnnualStatements> {
///         Ok(self.0.clone())
///     }
///
///     async fn market_capitalization(&self, _symbol: &str) -> Result<f64> {
///         Ok(1.0e9)
///     }
/// }
/// ```
pub trait FinancialDataSource: Send + Sync {
    /// Short provider name used in logs.
    fn name(&self) -> &str;

    /// Fetch the most recent annual balance sheet and income statement.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is unknown, the request fails, or the
    /// response cannot be interpreted.
    fn annual_statements(
        &self,
        symbol: &str,
    ) -> impl Future<Output = Result<AnnualStatements>> + Send;

    /// Fetch the current market capitalization.
    ///
    /// # Errors
    ///
    /// Returns an error if the symbol is unknown, the request fails, or the
    /// provider does not report a market capitalization.
    fn market_capitalization(&self, symbol: &str) -> impl Future<Output = Result<f64>> + Send;
}
