//! Data types for FMP API responses.
//!
//! Fields the Z-Score needs are `Option`s so that an absent or `null` value is
//! reported as missing instead of silently becoming zero.

use altz_traits::{Date, FieldMap, Statement, fields};
use serde::{Deserialize, Serialize};

use crate::{Result, error::FmpError};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

fn parse_date(date: &str) -> Result<Date> {
    Date::parse_from_str(date, "%Y-%m-%d").map_err(|_| FmpError::InvalidDate(date.to_string()))
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period (FY/Q1..Q4).
    #[serde(default)]
    pub period: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Earnings before interest and tax.
    #[serde(default)]
    pub ebit: Option<f64>,
}

impl IncomeStatement {
    /// Parse the date string into a NaiveDate.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::InvalidDate`] if the date is not `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Result<Date> {
        parse_date(&self.date)
    }

    /// Canonical fields of this statement.
    #[must_use]
    pub fn to_field_map(&self) -> FieldMap {
        let mut map = FieldMap::new(Statement::IncomeStatement);
        map.insert_opt(fields::TOTAL_REVENUE, self.revenue);
        map.insert_opt(fields::EBIT, self.ebit);
        map
    }
}

/// Balance sheet data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period.
    #[serde(default)]
    pub period: String,
    /// Total assets.
    #[serde(default)]
    pub total_assets: Option<f64>,
    /// Total current assets.
    #[serde(default)]
    pub total_current_assets: Option<f64>,
    /// Total liabilities.
    #[serde(default)]
    pub total_liabilities: Option<f64>,
    /// Total current liabilities.
    #[serde(default)]
    pub total_current_liabilities: Option<f64>,
    /// Retained earnings.
    #[serde(default)]
    pub retained_earnings: Option<f64>,
}

impl BalanceSheet {
    /// Parse the date string into a NaiveDate.
    ///
    /// # Errors
    ///
    /// Returns [`FmpError::InvalidDate`] if the date is not `YYYY-MM-DD`.
    pub fn parsed_date(&self) -> Result<Date> {
        parse_date(&self.date)
    }

    /// Canonical fields of this statement.
    #[must_use]
    pub fn to_field_map(&self) -> FieldMap {
        let mut map = FieldMap::new(Statement::BalanceSheet);
        map.insert_opt(fields::TOTAL_ASSETS, self.total_assets);
        map.insert_opt(fields::TOTAL_LIABILITIES, self.total_liabilities);
        map.insert_opt(fields::RETAINED_EARNINGS, self.retained_earnings);
        map.insert_opt(fields::TOTAL_CURRENT_ASSETS, self.total_current_assets);
        map.insert_opt(
            fields::TOTAL_CURRENT_LIABILITIES,
            self.total_current_liabilities,
        );
        map
    }
}

/// Real-time quote data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Market cap.
    #[serde(default)]
    pub market_cap: Option<f64>,
}
