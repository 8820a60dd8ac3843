//! Modified Altman Z-Score computation.
//!
//! The score combines five balance-sheet and income-statement ratios with
//! fixed weights:
//!
//! ```text
//! Z = 1.2*A + 1.4*B + 3.3*C + 0.6*D + 1.0*E
//! where:
//!   A = Working Capital / Total Assets
//!   B = Retained Earnings / Total Assets
//!   C = EBIT / Total Assets
//!   D = Market Cap / Total Liabilities
//!   E = Total Revenue / Total Assets
//! ```
//!
//! Total revenue replaces net sales in `E`, which is what makes the score
//! "modified".
//!
//! # Examples
//!
//! ```rust,no_run
//! use altz_score::{AltmanZScore, ZScoreWeights, Zone};
//! use altz_traits::FinancialSnapshot;
//!
//! let snapshot = FinancialSnapshot {
//!     symbol: "TICK".to_string(),
//!     period_end: None,
//!     total_revenue: 900.0,
//!     ebit: 80.0,
//!     total_assets: 1000.0,
//!     total_liabilities: 400.0,
//!     retained_earnings: 150.0,
//!     total_current_assets: 200.0,
//!     total_current_liabilities: 100.0,
//!     market_capitalization: 2000.0,
//! };
//!
//! let z = AltmanZScore::evaluate(&snapshot, &ZScoreWeights::default()).unwrap();
//! assert_eq!(z.zone(), Zone::Safe);
//! ```

mod calculator;
mod zscore;

// Re-export main types
pub use calculator::{FAILURE_SENTINEL, ScoreCalculator};
pub use zscore::{
    AltmanZScore, DISTRESS_THRESHOLD, SAFE_THRESHOLD, ZScoreComponents, ZScoreWeights, Zone,
    format_score,
};
