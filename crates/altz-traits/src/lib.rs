#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/altz/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for Altman Z-Score computation.
//!
//! This crate defines the error taxonomy, the statement and snapshot types,
//! and the [`FinancialDataSource`] trait every provider adapter implements.

/// The version of the altz-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod source;
pub mod types;

// Re-exports
pub use error::{ComputationFailure, Result};
pub use source::FinancialDataSource;
pub use types::{
    AnnualStatements, Date, FieldMap, FinancialSnapshot, Statement, Symbol, fields,
};
