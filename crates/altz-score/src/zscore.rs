//! Modified Altman Z-Score evaluation.

use std::fmt;

use altz_traits::{ComputationFailure, Date, FinancialSnapshot, Result, Symbol};
use serde::{Deserialize, Serialize};

/// Lower bound of the grey zone.
pub const DISTRESS_THRESHOLD: f64 = 1.81;

/// Upper bound of the grey zone.
pub const SAFE_THRESHOLD: f64 = 2.99;

/// Weights applied to the five ratios.
///
/// The defaults are the textbook coefficients:
/// ```text
/// Z = 1.2*A + 1.4*B + 3.3*C + 0.6*D + 1.0*E
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreWeights {
    /// Weight of working capital / total assets.
    pub working_capital: f64,
    /// Weight of retained earnings / total assets.
    pub retained_earnings: f64,
    /// Weight of EBIT / total assets.
    pub ebit: f64,
    /// Weight of market capitalization / total liabilities.
    pub market_value: f64,
    /// Weight of total revenue / total assets.
    pub revenue: f64,
}

impl Default for ZScoreWeights {
    fn default() -> Self {
        Self {
            working_capital: 1.2,
            retained_earnings: 1.4,
            ebit: 3.3,
            market_value: 0.6,
            revenue: 1.0,
        }
    }
}

/// The five Altman ratios.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ZScoreComponents {
    /// Working capital / total assets.
    pub a: f64,
    /// Retained earnings / total assets.
    pub b: f64,
    /// EBIT / total assets.
    pub c: f64,
    /// Market capitalization / total liabilities.
    pub d: f64,
    /// Total revenue / total assets. Stands in for net sales.
    pub e: f64,
}

impl ZScoreComponents {
    /// Compute the ratios from a snapshot.
    ///
    /// # Errors
    ///
    /// Returns [`ComputationFailure::NonFinite`] if any input is NaN or infinite
    /// and [`ComputationFailure::DivisionByZero`] if total assets or total
    /// liabilities is zero.
    pub fn from_snapshot(snapshot: &FinancialSnapshot) -> Result<Self> {
        let inputs = [
            (snapshot.total_revenue, "total revenue"),
            (snapshot.ebit, "ebit"),
            (snapshot.total_assets, "total assets"),
            (snapshot.total_liabilities, "total liabilities"),
            (snapshot.retained_earnings, "retained earnings"),
            (snapshot.total_current_assets, "total current assets"),
            (snapshot.total_current_liabilities, "total current liabilities"),
            (snapshot.market_capitalization, "market capitalization"),
        ];
        if let Some(&(_, name)) = inputs.iter().find(|(v, _)| !v.is_finite()) {
            return Err(ComputationFailure::NonFinite(name));
        }

        if snapshot.total_assets == 0.0 {
            return Err(ComputationFailure::DivisionByZero("total assets"));
        }
        if snapshot.total_liabilities == 0.0 {
            return Err(ComputationFailure::DivisionByZero("total liabilities"));
        }

        let total_assets = snapshot.total_assets;
        Ok(Self {
            a: snapshot.working_capital() / total_assets,
            b: snapshot.retained_earnings / total_assets,
            c: snapshot.ebit / total_assets,
            d: snapshot.market_capitalization / snapshot.total_liabilities,
            e: snapshot.total_revenue / total_assets,
        })
    }

    /// Weighted sum of the ratios.
    #[must_use]
    pub fn weighted_sum(&self, weights: &ZScoreWeights) -> f64 {
        weights.working_capital * self.a
            + weights.retained_earnings * self.b
            + weights.ebit * self.c
            + weights.market_value * self.d
            + weights.revenue * self.e
    }
}

/// Bankruptcy-risk zone of a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Zone {
    /// Score above [`SAFE_THRESHOLD`].
    Safe,
    /// Score between the thresholds, inclusive.
    Grey,
    /// Score below [`DISTRESS_THRESHOLD`].
    Distress,
}

impl Zone {
    /// Classify a score.
    #[must_use]
    pub fn classify(score: f64) -> Self {
        if score > SAFE_THRESHOLD {
            Self::Safe
        } else if score >= DISTRESS_THRESHOLD {
            Self::Grey
        } else {
            Self::Distress
        }
    }

    /// Lowercase zone name.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Grey => "grey",
            Self::Distress => "distress",
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A computed modified Altman Z-Score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AltmanZScore {
    /// Ticker symbol as supplied by the caller.
    pub symbol: Symbol,
    /// Fiscal period end of the statements used.
    pub period_end: Option<Date>,
    /// The five ratios.
    pub components: ZScoreComponents,
    /// Weighted score.
    pub score: f64,
}

impl AltmanZScore {
    /// Evaluate a snapshot with the given weights.
    ///
    /// # Errors
    ///
    /// Propagates [`ZScoreComponents::from_snapshot`] failures and returns
    /// [`ComputationFailure::NonFinite`] if the score overflows.
    pub fn evaluate(snapshot: &FinancialSnapshot, weights: &ZScoreWeights) -> Result<Self> {
        let components = ZScoreComponents::from_snapshot(snapshot)?;
        let score = components.weighted_sum(weights);
        if !score.is_finite() {
            return Err(ComputationFailure::NonFinite("score"));
        }

        Ok(Self {
            symbol: snapshot.symbol.clone(),
            period_end: snapshot.period_end,
            components,
            score,
        })
    }

    /// Bankruptcy-risk zone of this score.
    #[must_use]
    pub fn zone(&self) -> Zone {
        Zone::classify(self.score)
    }
}

impl fmt::Display for AltmanZScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&format_score(&self.symbol, self.score))
    }
}

/// Render the result sentence, with the score rounded to two decimals.
#[must_use]
pub fn format_score(ticker: &str, score: f64) -> String {
    format!("{ticker} modified Altman Z-Score = {score:.2}")
}
