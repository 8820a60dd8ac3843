#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/altz/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # altz
//!
//! Modified Altman Z-Score for a stock ticker.
//!
//! altz is an umbrella crate that re-exports the altz sub-crates and adds
//! configuration-driven provider selection plus the one-call entry points.
//!
//! ## Quick Start
//!
//! ```ignore
//! #[tokio::main]
//! async fn main() {
//!     // "MSFT modified Altman Z-Score = X.XX", or "None" on any failure
//!     println!("{}", altz::compute_altman_z_score("MSFT").await);
//!
//!     // Typed result for callers that need to know what went wrong
//!     match altz::try_compute_altman_z_score("MSFT").await {
//!         Ok(z) => println!("{:.2} ({})", z.score, z.zone()),
//!         Err(e) => eprintln!("{e}"),
//!     }
//! }
//! ```
//!
//! ## Crate Organization
//!
//! - [`traits`] - Error type, statement types and the [`FinancialDataSource`] trait
//! - [`score`] - Ratio computation and the [`ScoreCalculator`]
//! - [`fmp`] - Financial Modeling Prep adapter
//! - [`yahoo`] - Yahoo Finance adapter

use tracing::warn;

/// Version information for the altz crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod config;
pub mod source;

pub use config::{Config, ProviderKind};
pub use source::DataSource;

// ============================================================================
// Core Traits
// ============================================================================

/// Core types and traits.
pub mod traits {
    pub use altz_traits::*;
}

pub use altz_traits::{
    AnnualStatements, ComputationFailure, FieldMap, FinancialDataSource, FinancialSnapshot,
    Result,
};

// ============================================================================
// Score Computation
// ============================================================================

/// Score computation.
///
/// ```text
/// Z = 1.2*A + 1.4*B + 3.3*C + 0.6*D + 1.0*E
/// ```
///
/// Zones: above 2.99 safe, 1.81 to 2.99 grey, below 1.81 distress.
pub mod score {
    pub use altz_score::*;
}

pub use altz_score::{
    AltmanZScore, FAILURE_SENTINEL, ScoreCalculator, ZScoreComponents, ZScoreWeights, Zone,
    format_score,
};

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) adapter.
///
/// Requires an API key in `FMP_API_KEY`; get one at
/// <https://financialmodelingprep.com/>.
pub mod fmp {
    pub use altz_fmp::*;
}

/// Yahoo Finance adapter.
pub mod yahoo {
    pub use altz_yahoo::*;
}

// ============================================================================
// Entry Points
// ============================================================================

/// Compute the score for `ticker` with an explicit configuration.
///
/// A fresh data source is built for every call.
///
/// # Errors
///
/// Returns the configuration, fetch, or computation failure.
pub async fn try_compute_altman_z_score_with(
    config: &Config,
    ticker: &str,
) -> Result<AltmanZScore> {
    let source = DataSource::from_config(config)?;
    ScoreCalculator::new(source).score(ticker).await
}

/// Compute the score for `ticker` using configuration from the environment.
///
/// # Errors
///
/// Returns the configuration, fetch, or computation failure.
pub async fn try_compute_altman_z_score(ticker: &str) -> Result<AltmanZScore> {
    let config = Config::from_env()?;
    try_compute_altman_z_score_with(&config, ticker).await
}

/// Fail-soft variant of [`try_compute_altman_z_score_with`].
///
/// Returns `"<ticker> modified Altman Z-Score = X.XX"` or the literal `"None"`.
pub async fn compute_altman_z_score_with(config: &Config, ticker: &str) -> String {
    render(ticker, try_compute_altman_z_score_with(config, ticker).await)
}

/// Compute the score for `ticker` using configuration from the environment.
///
/// Returns `"<ticker> modified Altman Z-Score = X.XX"` on success and the
/// literal `"None"` on any failure, configuration errors included.
pub async fn compute_altman_z_score(ticker: &str) -> String {
    render(ticker, try_compute_altman_z_score(ticker).await)
}

fn render(ticker: &str, result: Result<AltmanZScore>) -> String {
    match result {
        Ok(z) => format_score(ticker, z.score),
        Err(e) => {
            warn!(ticker, error = %e, "altman z-score unavailable");
            FAILURE_SENTINEL.to_string()
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_render() {
        let z = AltmanZScore {
            symbol: "TICK".to_string(),
            period_end: None,
            components: ZScoreComponents {
                a: 0.1,
                b: 0.15,
                c: 0.08,
                d: 5.0,
                e: 0.9,
            },
            score: 4.494,
        };
        assert_eq!(render("TICK", Ok(z)), "TICK modified Altman Z-Score = 4.49");
        assert_eq!(
            render("TICK", Err(ComputationFailure::NoData("TICK".to_string()))),
            "None"
        );
    }

    #[tokio::test]
    async fn test_misconfigured_provider_is_none() {
        // fmp without an API key fails before any request is made
        let config = Config::for_provider(ProviderKind::Fmp);
        assert_eq!(compute_altman_z_score_with(&config, "MSFT").await, "None");
        assert!(matches!(
            try_compute_altman_z_score_with(&config, "MSFT").await,
            Err(ComputationFailure::Config(_))
        ));
    }
}
