//! Common types shared by data sources and the score calculator.
//!
//! Providers name their statement fields differently; adapters translate them
//! into the canonical names in [`fields`] so that extraction into a
//! [`FinancialSnapshot`] happens in exactly one place.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{ComputationFailure, Result};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A ticker symbol such as "AAPL" or "MSFT".
pub type Symbol = String;

/// Canonical statement field names.
pub mod fields {
    /// Total revenue (income statement).
    pub const TOTAL_REVENUE: &str = "totalRevenue";
    /// Earnings before interest and tax (income statement).
    pub const EBIT: &str = "ebit";
    /// Total assets (balance sheet).
    pub const TOTAL_ASSETS: &str = "totalAssets";
    /// Total liabilities (balance sheet).
    pub const TOTAL_LIABILITIES: &str = "totalLiabilities";
    /// Retained earnings (balance sheet).
    pub const RETAINED_EARNINGS: &str = "retainedEarnings";
    /// Total current assets (balance sheet).
    pub const TOTAL_CURRENT_ASSETS: &str = "totalCurrentAssets";
    /// Total current liabilities (balance sheet).
    pub const TOTAL_CURRENT_LIABILITIES: &str = "totalCurrentLiabilities";
}

/// Which financial statement a [`FieldMap`] was taken from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Statement {
    /// Balance sheet.
    BalanceSheet,
    /// Income statement.
    IncomeStatement,
}

impl Statement {
    /// Human readable statement name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance sheet",
            Self::IncomeStatement => "income statement",
        }
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Named numeric fields of one statement for one reporting period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldMap {
    statement: Statement,
    values: BTreeMap<String, f64>,
}

impl FieldMap {
    /// Create an empty field map for the given statement.
    #[must_use]
    pub const fn new(statement: Statement) -> Self {
        Self {
            statement,
            values: BTreeMap::new(),
        }
    }

    /// Insert a field value, replacing any previous one.
    pub fn insert(&mut self, field: impl Into<String>, value: f64) {
        self.values.insert(field.into(), value);
    }

    /// Insert a field value only if the provider reported one.
    pub fn insert_opt(&mut self, field: impl Into<String>, value: Option<f64>) {
        if let Some(v) = value {
            self.insert(field, v);
        }
    }

    /// Builder-style [`FieldMap::insert`].
    #[must_use]
    pub fn with(mut self, field: impl Into<String>, value: f64) -> Self {
        self.insert(field, value);
        self
    }

    /// The statement these fields belong to.
    #[must_use]
    pub const fn statement(&self) -> Statement {
        self.statement
    }

    /// Look up a field.
    #[must_use]
    pub fn get(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }

    /// Look up a field that must be present.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationFailure::MissingField`] if the field is absent.
    pub fn require(&self, field: &str) -> Result<f64> {
        self.get(field)
            .ok_or_else(|| ComputationFailure::missing_field(self.statement.as_str(), field))
    }

    /// Number of fields present.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no fields are present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Balance sheet and income statement of the same annual period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnnualStatements {
    /// Fiscal period end date.
    pub period_end: Date,
    /// Balance sheet fields.
    pub balance_sheet: FieldMap,
    /// Income statement fields.
    pub income_statement: FieldMap,
}

impl AnnualStatements {
    /// Select the most recent annual period from a provider's statement history.
    ///
    /// The balance sheet with the latest period end wins, and the income
    /// statement must report the same period end. Input order is irrelevant.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationFailure::NoData`] when there are no balance sheets and
    /// [`ComputationFailure::PeriodMismatch`] when no income statement shares the
    /// selected period end.
    pub fn latest(
        symbol: &str,
        balance_sheets: Vec<(Date, FieldMap)>,
        income_statements: Vec<(Date, FieldMap)>,
    ) -> Result<Self> {
        let (period_end, balance_sheet) = balance_sheets
            .into_iter()
            .max_by_key(|(date, _)| *date)
            .ok_or_else(|| ComputationFailure::NoData(symbol.to_string()))?;

        let income_statement = income_statements
            .into_iter()
            .find(|(date, _)| *date == period_end)
            .map(|(_, fields)| fields)
            .ok_or_else(|| ComputationFailure::PeriodMismatch {
                symbol: symbol.to_string(),
                period_end,
            })?;

        Ok(Self {
            period_end,
            balance_sheet,
            income_statement,
        })
    }
}

/// The eight figures an Altman Z-Score is computed from.
///
/// Built fresh for every computation and discarded afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialSnapshot {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Fiscal period end the statement figures come from.
    pub period_end: Option<Date>,
    /// Total revenue.
    pub total_revenue: f64,
    /// Earnings before interest and tax.
    pub ebit: f64,
    /// Total assets.
    pub total_assets: f64,
    /// Total liabilities.
    pub total_liabilities: f64,
    /// Retained earnings.
    pub retained_earnings: f64,
    /// Total current assets.
    pub total_current_assets: f64,
    /// Total current liabilities.
    pub total_current_liabilities: f64,
    /// Market capitalization.
    pub market_capitalization: f64,
}

impl FinancialSnapshot {
    /// Extract a snapshot from annual statements and a market capitalization.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationFailure::MissingField`] for the first absent field.
    pub fn from_statements(
        symbol: &str,
        statements: &AnnualStatements,
        market_capitalization: f64,
    ) -> Result<Self> {
        let income = &statements.income_statement;
        let balance = &statements.balance_sheet;

        Ok(Self {
            symbol: symbol.to_string(),
            period_end: Some(statements.period_end),
            total_revenue: income.require(fields::TOTAL_REVENUE)?,
            ebit: income.require(fields::EBIT)?,
            total_assets: balance.require(fields::TOTAL_ASSETS)?,
            total_liabilities: balance.require(fields::TOTAL_LIABILITIES)?,
            retained_earnings: balance.require(fields::RETAINED_EARNINGS)?,
            total_current_assets: balance.require(fields::TOTAL_CURRENT_ASSETS)?,
            total_current_liabilities: balance.require(fields::TOTAL_CURRENT_LIABILITIES)?,
            market_capitalization,
        })
    }

    /// Current assets minus current liabilities.
    #[must_use]
    pub fn working_capital(&self) -> f64 {
        self.total_current_assets - self.total_current_liabilities
    }
}
