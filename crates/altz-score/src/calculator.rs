//! Score calculator bound to a data source.

use altz_traits::{FinancialDataSource, FinancialSnapshot, Result};
use tracing::{debug, warn};

use crate::zscore::{AltmanZScore, ZScoreWeights, format_score};

/// Sentinel returned by the fail-soft entry point.
pub const FAILURE_SENTINEL: &str = "None";

/// Computes modified Altman Z-Scores from a [`FinancialDataSource`].
///
/// Each call fetches a fresh snapshot; nothing is cached between calls.
///
/// # Example
///
/// ```rust,ignore
/// use altz_score::ScoreCalculator;
/// use altz_yahoo::YahooClient;
///
/// let calculator = ScoreCalculator::new(YahooClient::new()?);
/// println!("{}", calculator.compute_altman_z_score("MSFT").await);
/// ```
#[derive(Debug, Clone)]
pub struct ScoreCalculator<S> {
    source: S,
    weights: ZScoreWeights,
}

impl<S: FinancialDataSource> ScoreCalculator<S> {
    /// Create a calculator with the textbook weights.
    pub fn new(source: S) -> Self {
        Self::with_weights(source, ZScoreWeights::default())
    }

    /// Create a calculator with custom weights.
    pub const fn with_weights(source: S, weights: ZScoreWeights) -> Self {
        Self { source, weights }
    }

    /// The underlying data source.
    pub const fn source(&self) -> &S {
        &self.source
    }

    /// The ratio weights.
    pub const fn weights(&self) -> &ZScoreWeights {
        &self.weights
    }

    /// Fetch the figures for `ticker` and build a snapshot.
    ///
    /// # Errors
    ///
    /// Returns any data source failure or a missing field.
    pub async fn snapshot(&self, ticker: &str) -> Result<FinancialSnapshot> {
        debug!(source = self.source.name(), ticker, "fetching annual statements");
        let (statements, market_cap) = tokio::join!(
            self.source.annual_statements(ticker),
            self.source.market_capitalization(ticker),
        );

        FinancialSnapshot::from_statements(ticker, &statements?, market_cap?)
    }

    /// Evaluate an already fetched snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error on zero denominators or non-finite values.
    pub fn score_snapshot(&self, snapshot: &FinancialSnapshot) -> Result<AltmanZScore> {
        let z = AltmanZScore::evaluate(snapshot, &self.weights)?;
        debug!(
            ticker = %z.symbol,
            a = z.components.a,
            b = z.components.b,
            c = z.components.c,
            d = z.components.d,
            e = z.components.e,
            score = z.score,
            "computed altman z-score"
        );
        Ok(z)
    }

    /// Fetch and score `ticker`.
    ///
    /// # Errors
    ///
    /// Returns a [`ComputationFailure`](altz_traits::ComputationFailure) describing
    /// the first thing that went wrong.
    pub async fn score(&self, ticker: &str) -> Result<AltmanZScore> {
        let snapshot = self.snapshot(ticker).await?;
        self.score_snapshot(&snapshot)
    }

    /// Fetch and score `ticker`, rendering the result as a sentence.
    ///
    /// Returns `"<ticker> modified Altman Z-Score = X.XX"` on success and the
    /// literal `"None"` on any failure.
    pub async fn compute_altman_z_score(&self, ticker: &str) -> String {
        match self.score(ticker).await {
            Ok(z) => format_score(ticker, z.score),
            Err(e) => {
                warn!(
                    source = self.source.name(),
                    ticker,
                    error = %e,
                    "altman z-score unavailable"
                );
                FAILURE_SENTINEL.to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altz_traits::{AnnualStatements, ComputationFailure, Date, FieldMap, Statement, fields};
    use approx::assert_relative_eq;

    struct StubSource {
        statements: Result<AnnualStatements>,
        market_cap: Result<f64>,
    }

    impl FinancialDataSource for StubSource {
        fn name(&self) -> &str {
            "stub"
        }

        async fn annual_statements(&self, _symbol: &str) -> Result<AnnualStatements> {
            self.statements.clone()
        }

        async fn market_capitalization(&self, _symbol: &str) -> Result<f64> {
            self.market_cap.clone()
        }
    }

    fn statements(total_assets: f64, total_liabilities: f64) -> AnnualStatements {
        AnnualStatements {
            period_end: Date::from_ymd_opt(2023, 12, 31).unwrap(),
            balance_sheet: FieldMap::new(Statement::BalanceSheet)
                .with(fields::TOTAL_CURRENT_ASSETS, 200.0)
                .with(fields::TOTAL_CURRENT_LIABILITIES, 100.0)
                .with(fields::TOTAL_ASSETS, total_assets)
                .with(fields::RETAINED_EARNINGS, 150.0)
                .with(fields::TOTAL_LIABILITIES, total_liabilities),
            income_statement: FieldMap::new(Statement::IncomeStatement)
                .with(fields::EBIT, 80.0)
                .with(fields::TOTAL_REVENUE, 900.0),
        }
    }

    fn calculator(
        statements: Result<AnnualStatements>,
        market_cap: Result<f64>,
    ) -> ScoreCalculator<StubSource> {
        ScoreCalculator::new(StubSource {
            statements,
            market_cap,
        })
    }

    #[tokio::test]
    async fn test_reference_snapshot() {
        let calc = calculator(Ok(statements(1000.0, 400.0)), Ok(2000.0));
        assert_eq!(
            calc.compute_altman_z_score("TICK").await,
            "TICK modified Altman Z-Score = 4.49"
        );

        let z = calc.score("TICK").await.unwrap();
        assert_relative_eq!(z.score, 4.494, epsilon = 1e-6);
        assert_eq!(z.period_end, Date::from_ymd_opt(2023, 12, 31));
    }

    #[tokio::test]
    async fn test_zero_total_assets_is_none() {
        let calc = calculator(Ok(statements(0.0, 400.0)), Ok(2000.0));
        assert_eq!(calc.compute_altman_z_score("TICK").await, "None");
        assert_eq!(
            calc.score("TICK").await,
            Err(ComputationFailure::DivisionByZero("total assets"))
        );
    }

    #[tokio::test]
    async fn test_zero_total_liabilities_is_none() {
        let calc = calculator(Ok(statements(1000.0, 0.0)), Ok(2000.0));
        assert_eq!(calc.compute_altman_z_score("TICK").await, "None");
    }

    #[tokio::test]
    async fn test_missing_field_is_none() {
        let mut s = statements(1000.0, 400.0);
        s.income_statement = FieldMap::new(Statement::IncomeStatement).with(fields::EBIT, 80.0);
        let calc = calculator(Ok(s), Ok(2000.0));

        assert_eq!(calc.compute_altman_z_score("TICK").await, "None");
        assert!(matches!(
            calc.score("TICK").await,
            Err(ComputationFailure::MissingField { .. })
        ));
    }

    #[tokio::test]
    async fn test_unreachable_source_is_none() {
        let calc = calculator(
            Err(ComputationFailure::DataFetch("connection refused".to_string())),
            Err(ComputationFailure::DataFetch("connection refused".to_string())),
        );
        assert_eq!(calc.compute_altman_z_score("TICK").await, "None");
    }

    #[tokio::test]
    async fn test_market_cap_failure_is_none() {
        let calc = calculator(
            Ok(statements(1000.0, 400.0)),
            Err(ComputationFailure::RateLimited("stub".to_string())),
        );
        assert_eq!(
            calc.score("TICK").await,
            Err(ComputationFailure::RateLimited("stub".to_string()))
        );
        assert_eq!(calc.compute_altman_z_score("TICK").await, FAILURE_SENTINEL);
    }

    #[tokio::test]
    async fn test_repeated_calls_are_identical() {
        let calc = calculator(Ok(statements(1000.0, 400.0)), Ok(2000.0));
        let first = calc.compute_altman_z_score("TICK").await;
        let second = calc.compute_altman_z_score("TICK").await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_ticker_is_echoed_verbatim() {
        let calc = calculator(Ok(statements(1000.0, 400.0)), Ok(2000.0));
        assert_eq!(
            calc.compute_altman_z_score("brk-b").await,
            "brk-b modified Altman Z-Score = 4.49"
        );
    }

    #[test]
    fn test_custom_weights() {
        let weights = ZScoreWeights {
            working_capital: 0.0,
            retained_earnings: 0.0,
            ebit: 0.0,
            market_value: 1.0,
            revenue: 0.0,
        };
        let calc = ScoreCalculator::with_weights(
            StubSource {
                statements: Ok(statements(1000.0, 400.0)),
                market_cap: Ok(2000.0),
            },
            weights,
        );
        let snapshot =
            FinancialSnapshot::from_statements("TICK", &statements(1000.0, 400.0), 2000.0)
                .unwrap();
        let z = calc.score_snapshot(&snapshot).unwrap();
        assert_relative_eq!(z.score, 5.0);
        assert_eq!(calc.weights(), &weights);
        assert_eq!(calc.source().name(), "stub");
    }
}
