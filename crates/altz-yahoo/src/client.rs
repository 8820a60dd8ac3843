//! Yahoo Finance client implementation.

use crate::{
    Result,
    error::YahooError,
    types::{QuoteSummaryResponse, QuoteSummaryResult},
};
use altz_traits::{AnnualStatements, ComputationFailure, FinancialDataSource};
use reqwest::{Client, StatusCode, header};
use std::{sync::Arc, time::Duration};
use tokio::sync::OnceCell;
use tracing::debug;

/// Base URL for the Yahoo Finance query API.
pub const YAHOO_BASE_URL: &str = "https://query2.finance.yahoo.com";

/// Page that sets the session cookie the crumb is bound to.
const COOKIE_URL: &str = "https://fc.yahoo.com";

/// Yahoo rejects requests without a browser user agent.
const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Modules holding annual statements.
const STATEMENT_MODULES: &[&str] = &["balanceSheetHistory", "incomeStatementHistory"];

/// Module holding the market capitalization.
const PRICE_MODULES: &[&str] = &["price"];

/// Yahoo Finance `quoteSummary` client.
///
/// The crumb is fetched on first use and shared by clones, since it is bound
/// to the cookie jar of the underlying HTTP client.
#[derive(Debug, Clone)]
pub struct YahooClient {
    client: Client,
    base_url: String,
    cookie_url: Option<String>,
    crumb: Arc<OnceCell<String>>,
}

impl YahooClient {
    /// Create a client that performs the cookie and crumb handshake.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Ok(Self {
            client: Self::http_client(None)?,
            base_url: YAHOO_BASE_URL.to_string(),
            cookie_url: Some(COOKIE_URL.to_string()),
            crumb: Arc::default(),
        })
    }

    fn http_client(timeout: Option<Duration>) -> Result<Client> {
        let mut builder = Client::builder().cookie_store(true).user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self.crumb = Arc::default();
        self
    }

    /// Use a different page to obtain the session cookie.
    #[must_use]
    pub fn with_cookie_url(mut self, cookie_url: impl Into<String>) -> Self {
        self.cookie_url = Some(cookie_url.into());
        self.crumb = Arc::default();
        self
    }

    /// Skip the cookie and crumb handshake.
    #[must_use]
    pub fn without_crumb(mut self) -> Self {
        self.cookie_url = None;
        self
    }

    /// Rebuild the HTTP client with a request timeout.
    ///
    /// The new client starts with an empty cookie jar, so any cached crumb is
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_timeout(mut self, timeout: Duration) -> Result<Self> {
        self.client = Self::http_client(Some(timeout))?;
        self.crumb = Arc::default();
        Ok(self)
    }

    fn summary_url(&self, symbol: &str, modules: &[&str], crumb: Option<&str>) -> String {
        let mut url = format!(
            "{}/v10/finance/quoteSummary/{}?modules={}",
            self.base_url,
            symbol.to_uppercase(),
            modules.join(",")
        );
        if let Some(crumb) = crumb {
            url.push_str("&crumb=");
            url.push_str(crumb);
        }
        url
    }

    /// Crumb for this client's cookie session, fetched once.
    ///
    /// Concurrent callers wait on the same handshake.
    async fn crumb(&self, cookie_url: &str) -> Result<&str> {
        self.crumb
            .get_or_try_init(|| self.fetch_crumb(cookie_url))
            .await
            .map(String::as_str)
    }

    async fn fetch_crumb(&self, cookie_url: &str) -> Result<String> {
        debug!(cookie_url, "yahoo crumb handshake");
        // The cookie page answers 404 but still sets the session cookie
        let _ = self.client.get(cookie_url).send().await?;

        let response = self
            .client
            .get(format!("{}/v1/test/getcrumb", self.base_url))
            .send()
            .await?;
        let status = response.status();
        let crumb = response.text().await?;
        if !status.is_success() || crumb.trim().is_empty() {
            return Err(YahooError::Crumb(format!("HTTP {status}")));
        }
        Ok(crumb.trim().to_string())
    }

    /// Fetch `quoteSummary` modules for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, Yahoo reports an error, or the
    /// response cannot be parsed.
    pub async fn quote_summary(
        &self,
        symbol: &str,
        modules: &[&str],
    ) -> Result<QuoteSummaryResult> {
        let crumb = match self.cookie_url.as_deref() {
            Some(cookie_url) => Some(self.crumb(cookie_url).await?),
            None => None,
        };
        let url = self.summary_url(symbol, modules, crumb);
        debug!(symbol, modules = %modules.join(","), "yahoo quoteSummary request");

        let response = self
            .client
            .get(&url)
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(YahooError::RateLimitExceeded);
        }

        let text = response.text().await?;
        if !status.is_success() {
            // Yahoo explains most failures in the quoteSummary error object
            return match parse_summary(symbol, &text) {
                Err(e @ (YahooError::SymbolNotFound(_) | YahooError::Api(_))) => Err(e),
                _ => Err(YahooError::Api(format!("HTTP {status}: {text}"))),
            };
        }

        parse_summary(symbol, &text)
    }
}

fn parse_summary(symbol: &str, text: &str) -> Result<QuoteSummaryResult> {
    let response: QuoteSummaryResponse = serde_json::from_str(text)?;
    let summary = response.quote_summary;

    if let Some(error) = summary.error {
        return Err(if error.code == "Not Found" {
            YahooError::SymbolNotFound(symbol.to_string())
        } else {
            YahooError::Api(format!("{}: {}", error.code, error.description))
        });
    }

    summary
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| YahooError::SymbolNotFound(symbol.to_string()))
}

fn annual_statements_from(
    symbol: &str,
    result: QuoteSummaryResult,
) -> altz_traits::Result<AnnualStatements> {
    let balance = result
        .balance_sheet_history
        .ok_or_else(|| YahooError::MissingModule {
            symbol: symbol.to_string(),
            module: "balanceSheetHistory",
        })?;
    let income = result
        .income_statement_history
        .ok_or_else(|| YahooError::MissingModule {
            symbol: symbol.to_string(),
            module: "incomeStatementHistory",
        })?;

    let balance_sheets = balance
        .balance_sheet_statements
        .iter()
        .map(|b| Ok((b.parsed_date()?, b.to_field_map())))
        .collect::<Result<Vec<_>>>()?;
    let income_statements = income
        .income_statement_history
        .iter()
        .map(|i| Ok((i.parsed_date()?, i.to_field_map())))
        .collect::<Result<Vec<_>>>()?;

    AnnualStatements::latest(symbol, balance_sheets, income_statements)
}

impl FinancialDataSource for YahooClient {
    fn name(&self) -> &str {
        "yahoo"
    }

    async fn annual_statements(&self, symbol: &str) -> altz_traits::Result<AnnualStatements> {
        let result = self.quote_summary(symbol, STATEMENT_MODULES).await?;
        annual_statements_from(symbol, result)
    }

    async fn market_capitalization(&self, symbol: &str) -> altz_traits::Result<f64> {
        let result = self.quote_summary(symbol, PRICE_MODULES).await?;
        result
            .price
            .as_ref()
            .and_then(|p| p.market_cap())
            .ok_or_else(|| ComputationFailure::missing_field("price", "marketCap"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use altz_traits::{Date, fields};
    use wiremock::{
        Mock, MockServer, ResponseTemplate,
        matchers::{method, path, query_param},
    };

    const SUMMARY_JSON: &str = r#"{
        "quoteSummary": {
            "result": [{
                "balanceSheetHistory": {
                    "balanceSheetStatements": [
                        {
                            "endDate": {"raw": 1719705600, "fmt": "2024-06-30"},
                            "totalAssets": {"raw": 512163000000},
                            "totalLiab": {"raw": 243686000000},
                            "retainedEarnings": {"raw": 173144000000},
                            "totalCurrentAssets": {"raw": 159734000000},
                            "totalCurrentLiabilities": {"raw": 125286000000}
                        },
                        {
                            "endDate": {"raw": 1688083200, "fmt": "2023-06-30"},
                            "totalAssets": {"raw": 411976000000}
                        }
                    ]
                },
                "incomeStatementHistory": {
                    "incomeStatementHistory": [
                        {
                            "endDate": {"raw": 1688083200, "fmt": "2023-06-30"},
                            "totalRevenue": {"raw": 211915000000}
                        },
                        {
                            "endDate": {"raw": 1719705600, "fmt": "2024-06-30"},
                            "totalRevenue": {"raw": 245122000000},
                            "ebit": {"raw": 109433000000}
                        }
                    ]
                },
                "price": {"symbol": "MSFT", "marketCap": {"raw": 3100000000000, "fmt": "3.1T"}}
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_new_reports_build_result() {
        let client = YahooClient::new().unwrap();
        assert!(client.cookie_url.is_some());
        assert!(client.crumb.get().is_none());
    }

    #[test]
    fn test_summary_url() {
        let client = YahooClient::new().unwrap();
        assert_eq!(
            client.summary_url("msft", STATEMENT_MODULES, None),
            "https://query2.finance.yahoo.com/v10/finance/quoteSummary/MSFT?modules=balanceSheetHistory,incomeStatementHistory"
        );
        assert_eq!(
            client
                .with_base_url("http://localhost:8080/")
                .summary_url("msft", PRICE_MODULES, Some("abc")),
            "http://localhost:8080/v10/finance/quoteSummary/MSFT?modules=price&crumb=abc"
        );
    }

    #[test]
    fn test_annual_statements_pairs_latest_period() {
        let result = parse_summary("MSFT", SUMMARY_JSON).unwrap();
        let statements = annual_statements_from("MSFT", result).unwrap();

        assert_eq!(
            statements.period_end,
            Date::from_ymd_opt(2024, 6, 30).unwrap()
        );
        assert_eq!(
            statements.balance_sheet.get(fields::TOTAL_LIABILITIES),
            Some(243_686_000_000.0)
        );
        assert_eq!(
            statements.income_statement.get(fields::EBIT),
            Some(109_433_000_000.0)
        );
    }

    #[test]
    fn test_not_found_error() {
        let body = r#"{"quoteSummary": {"result": null, "error": {"code": "Not Found", "description": "Quote not found for symbol: ZZZZ"}}}"#;
        assert!(matches!(
            parse_summary("ZZZZ", body),
            Err(YahooError::SymbolNotFound(s)) if s == "ZZZZ"
        ));
    }

    #[test]
    fn test_other_api_error() {
        let body = r#"{"quoteSummary": {"result": null, "error": {"code": "Unauthorized", "description": "Invalid Crumb"}}}"#;
        assert!(matches!(parse_summary("MSFT", body), Err(YahooError::Api(_))));
    }

    #[test]
    fn test_malformed_body() {
        assert!(matches!(
            parse_summary("MSFT", "<html>"),
            Err(YahooError::Json(_))
        ));
    }

    #[test]
    fn test_missing_module() {
        let result = QuoteSummaryResult::default();
        assert!(matches!(
            annual_statements_from("MSFT", result),
            Err(ComputationFailure::MalformedResponse(_))
        ));
    }

    #[test]
    fn test_price_module_market_cap() {
        let body = r#"{"quoteSummary": {"result": [{"price": {"symbol": "MSFT", "marketCap": {"raw": 3100000000000, "fmt": "3.1T"}}}], "error": null}}"#;
        let result = parse_summary("MSFT", body).unwrap();
        assert_eq!(
            result.price.unwrap().market_cap(),
            Some(3_100_000_000_000.0)
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_data_fetch_failure() {
        let client = YahooClient::new()
            .unwrap()
            .with_base_url("http://127.0.0.1:9")
            .without_crumb()
            .with_timeout(Duration::from_secs(2))
            .unwrap();
        let err = client.annual_statements("MSFT").await.unwrap_err();
        assert!(matches!(err, ComputationFailure::DataFetch(_)));
    }

    #[tokio::test]
    async fn test_concurrent_requests_share_one_handshake() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/"))
            .respond_with(
                ResponseTemplate::new(404).insert_header("set-cookie", "A3=session; Path=/"),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/test/getcrumb"))
            .respond_with(ResponseTemplate::new(200).set_body_string("crumb123"))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v10/finance/quoteSummary/MSFT"))
            .and(query_param("crumb", "crumb123"))
            .respond_with(
                ResponseTemplate::new(200).set_body_raw(SUMMARY_JSON, "application/json"),
            )
            .expect(3)
            .mount(&server)
            .await;

        let client = YahooClient::new()
            .unwrap()
            .with_timeout(Duration::from_secs(5))
            .unwrap()
            .with_base_url(server.uri())
            .with_cookie_url(format!("{}/", server.uri()));

        let (statements, market_cap) = tokio::join!(
            client.annual_statements("MSFT"),
            client.market_capitalization("MSFT"),
        );
        assert_eq!(
            statements.unwrap().period_end,
            Date::from_ymd_opt(2024, 6, 30).unwrap()
        );
        assert_eq!(market_cap.unwrap(), 3_100_000_000_000.0);

        // clones reuse the crumb as well
        let clone = client.clone();
        assert!(clone.market_capitalization("MSFT").await.is_ok());
    }

    #[tokio::test]
    async fn test_failed_handshake_is_data_fetch_failure() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/test/getcrumb"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let client = YahooClient::new()
            .unwrap()
            .with_base_url(server.uri())
            .with_cookie_url(format!("{}/", server.uri()));
        let err = client.market_capitalization("MSFT").await.unwrap_err();
        assert!(matches!(err, ComputationFailure::DataFetch(_)));
    }
}
