//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{BalanceSheet, IncomeStatement, Period, Quote},
};
use altz_traits::{AnnualStatements, ComputationFailure, FinancialDataSource};
use reqwest::Client;
use std::{env, time::Duration};
use tracing::debug;

/// Base URL for the FMP stable API.
pub const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Annual periods requested per statement, enough to pair the latest
/// balance sheet with its income statement.
const STATEMENT_LIMIT: u32 = 5;

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            base_url: FMP_BASE_URL.to_string(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // Try to load .env file (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Rebuild the HTTP client with a request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Client::builder().timeout(timeout).build()?;
        Ok(self)
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{}/{endpoint}&apikey={}", self.base_url, self.api_key)
        } else {
            format!("{}/{endpoint}?apikey={}", self.base_url, self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        debug!(endpoint, "fmp request");
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        parse_body(&text)
    }

    /// Get income statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return (most recent first)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        let endpoint = statement_endpoint("income-statement", symbol, period, limit);
        self.get(&endpoint).await
    }

    /// Get balance sheets for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn balance_sheet(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<BalanceSheet>> {
        let endpoint = statement_endpoint("balance-sheet-statement", symbol, period, limit);
        self.get(&endpoint).await
    }

    /// Get real-time quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the symbol is unknown.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let endpoint = format!("quote?symbol={}", symbol.to_uppercase());
        let quotes: Vec<Quote> = self.get(&endpoint).await?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }
}

fn statement_endpoint(path: &str, symbol: &str, period: Period, limit: Option<u32>) -> String {
    let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
    format!(
        "{path}?symbol={}&period={}{}",
        symbol.to_uppercase(),
        period.as_str(),
        limit_param
    )
}

fn parse_body<T: serde::de::DeserializeOwned>(text: &str) -> Result<T> {
    // FMP reports some errors with a 200 status
    if text.contains("\"Error Message\"") || text.contains("\"error\"") {
        return Err(FmpError::Api(text.to_string()));
    }

    serde_json::from_str(text).map_err(|e| {
        FmpError::Json(serde_json::Error::io(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            format!("Failed to parse: {e}. Response: {text}"),
        )))
    })
}

fn annual_statements_from(
    symbol: &str,
    balance: &[BalanceSheet],
    income: &[IncomeStatement],
) -> altz_traits::Result<AnnualStatements> {
    let balance_sheets = balance
        .iter()
        .map(|b| Ok((b.parsed_date()?, b.to_field_map())))
        .collect::<Result<Vec<_>>>()?;
    let income_statements = income
        .iter()
        .map(|i| Ok((i.parsed_date()?, i.to_field_map())))
        .collect::<Result<Vec<_>>>()?;

    AnnualStatements::latest(symbol, balance_sheets, income_statements)
}

impl FinancialDataSource for FmpClient {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn annual_statements(&self, symbol: &str) -> altz_traits::Result<AnnualStatements> {
        let (balance, income) = tokio::join!(
            self.balance_sheet(symbol, Period::Annual, Some(STATEMENT_LIMIT)),
            self.income_statement(symbol, Period::Annual, Some(STATEMENT_LIMIT)),
        );

        annual_statements_from(symbol, &balance?, &income?)
    }

    async fn market_capitalization(&self, symbol: &str) -> altz_traits::Result<f64> {
        self.quote(symbol)
            .await?
            .market_cap
            .ok_or_else(|| ComputationFailure::missing_field("quote", "marketCap"))
    }
}
