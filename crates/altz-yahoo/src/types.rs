//! Data types for Yahoo Finance `quoteSummary` responses.
//!
//! Numeric values arrive as `{"raw": 123, "fmt": "123"}` objects, and an
//! unreported value is an empty object `{}`.

use altz_traits::{Date, FieldMap, Statement, fields};
use chrono::DateTime;
use serde::{Deserialize, Serialize};

use crate::{Result, error::YahooError};

/// A Yahoo formatted value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YahooValue {
    /// Raw numeric value.
    #[serde(default)]
    pub raw: Option<f64>,
    /// Display string.
    #[serde(default)]
    pub fmt: Option<String>,
}

fn raw(value: Option<&YahooValue>) -> Option<f64> {
    value.and_then(|v| v.raw)
}

/// Period end of a statement, from `endDate.fmt` or `endDate.raw` (epoch seconds).
fn end_date(value: &YahooValue) -> Result<Date> {
    if let Some(fmt) = value.fmt.as_deref()
        && let Ok(date) = Date::parse_from_str(fmt, "%Y-%m-%d")
    {
        return Ok(date);
    }

    value
        .raw
        .and_then(|secs| DateTime::from_timestamp(secs as i64, 0))
        .map(|dt| dt.date_naive())
        .ok_or(YahooError::InvalidDate)
}

/// Top level `quoteSummary` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSummaryResponse {
    /// Summary payload.
    #[serde(rename = "quoteSummary")]
    pub quote_summary: QuoteSummary,
}

/// Result or error of a `quoteSummary` request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuoteSummary {
    /// One entry per requested symbol.
    #[serde(default)]
    pub result: Option<Vec<QuoteSummaryResult>>,
    /// Error description.
    #[serde(default)]
    pub error: Option<YahooApiError>,
}

/// Error object returned by Yahoo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooApiError {
    /// Error code, e.g. "Not Found".
    #[serde(default)]
    pub code: String,
    /// Error description.
    #[serde(default)]
    pub description: String,
}

/// Requested modules for one symbol.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummaryResult {
    /// Annual balance sheets.
    #[serde(default)]
    pub balance_sheet_history: Option<BalanceSheetHistory>,
    /// Annual income statements.
    #[serde(default)]
    pub income_statement_history: Option<IncomeStatementHistory>,
    /// Price module (market cap).
    #[serde(default)]
    pub price: Option<PriceModule>,
}

/// `balanceSheetHistory` module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheetHistory {
    /// Statements, most recent first.
    #[serde(default)]
    pub balance_sheet_statements: Vec<BalanceSheet>,
}

/// `incomeStatementHistory` module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatementHistory {
    /// Statements, most recent first.
    #[serde(default)]
    pub income_statement_history: Vec<IncomeStatement>,
}

/// One annual balance sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Period end.
    #[serde(default)]
    pub end_date: YahooValue,
    /// Total assets.
    pub total_assets: Option<YahooValue>,
    /// Total liabilities.
    pub total_liab: Option<YahooValue>,
    /// Retained earnings.
    pub retained_earnings: Option<YahooValue>,
    /// Total current assets.
    pub total_current_assets: Option<YahooValue>,
    /// Total current liabilities.
    pub total_current_liabilities: Option<YahooValue>,
}

impl BalanceSheet {
    /// Period end date.
    ///
    /// # Errors
    ///
    /// Returns [`YahooError::InvalidDate`] if `endDate` is unusable.
    pub fn parsed_date(&self) -> Result<Date> {
        end_date(&self.end_date)
    }

    /// Canonical fields of this statement.
    #[must_use]
    pub fn to_field_map(&self) -> FieldMap {
        let mut map = FieldMap::new(Statement::BalanceSheet);
        map.insert_opt(fields::TOTAL_ASSETS, raw(self.total_assets.as_ref()));
        map.insert_opt(fields::TOTAL_LIABILITIES, raw(self.total_liab.as_ref()));
        map.insert_opt(fields::RETAINED_EARNINGS, raw(self.retained_earnings.as_ref()));
        map.insert_opt(
            fields::TOTAL_CURRENT_ASSETS,
            raw(self.total_current_assets.as_ref()),
        );
        map.insert_opt(
            fields::TOTAL_CURRENT_LIABILITIES,
            raw(self.total_current_liabilities.as_ref()),
        );
        map
    }
}

/// One annual income statement.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Period end.
    #[serde(default)]
    pub end_date: YahooValue,
    /// Total revenue.
    pub total_revenue: Option<YahooValue>,
    /// Earnings before interest and tax.
    pub ebit: Option<YahooValue>,
}

impl IncomeStatement {
    /// Period end date.
    ///
    /// # Errors
    ///
    /// Returns [`YahooError::InvalidDate`] if `endDate` is unusable.
    pub fn parsed_date(&self) -> Result<Date> {
        end_date(&self.end_date)
    }

    /// Canonical fields of this statement.
    #[must_use]
    pub fn to_field_map(&self) -> FieldMap {
        let mut map = FieldMap::new(Statement::IncomeStatement);
        map.insert_opt(fields::TOTAL_REVENUE, raw(self.total_revenue.as_ref()));
        map.insert_opt(fields::EBIT, raw(self.ebit.as_ref()));
        map
    }
}

/// `price` module.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceModule {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: Option<String>,
    /// Market capitalization.
    pub market_cap: Option<YahooValue>,
}

impl PriceModule {
    /// Raw market capitalization, if reported.
    #[must_use]
    pub fn market_cap(&self) -> Option<f64> {
        raw(self.market_cap.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_end_date_from_fmt() {
        let v = YahooValue {
            raw: Some(1_696_032_000.0),
            fmt: Some("2023-09-30".to_string()),
        };
        assert_eq!(end_date(&v).unwrap(), Date::from_ymd_opt(2023, 9, 30).unwrap());
    }

    #[test]
    fn test_end_date_from_raw() {
        let v = YahooValue {
            raw: Some(1_696_032_000.0),
            fmt: None,
        };
        assert_eq!(end_date(&v).unwrap(), Date::from_ymd_opt(2023, 9, 30).unwrap());
    }

    #[test]
    fn test_end_date_missing() {
        assert!(matches!(
            end_date(&YahooValue::default()),
            Err(YahooError::InvalidDate)
        ));
    }

    #[test]
    fn test_empty_value_object_is_missing() {
        let json = r#"{
            "endDate": {"raw": 1696032000, "fmt": "2023-09-30"},
            "totalRevenue": {"raw": 211915000000, "fmt": "211.92B"},
            "ebit": {}
        }"#;
        let income: IncomeStatement = serde_json::from_str(json).unwrap();
        let map = income.to_field_map();
        assert_eq!(map.get(fields::TOTAL_REVENUE), Some(211_915_000_000.0));
        assert!(map.get(fields::EBIT).is_none());
    }

    #[test]
    fn test_total_liab_maps_to_total_liabilities() {
        let json = r#"{
            "endDate": {"raw": 1696032000, "fmt": "2023-09-30"},
            "totalLiab": {"raw": 205753000000}
        }"#;
        let balance: BalanceSheet = serde_json::from_str(json).unwrap();
        assert_eq!(
            balance.to_field_map().get(fields::TOTAL_LIABILITIES),
            Some(205_753_000_000.0)
        );
    }
}
