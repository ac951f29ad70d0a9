#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/alphaseeker/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core types and traits for the AlphaSeeker valuation toolkit.
//!
//! This crate provides the value objects passed between the DCF engine, the
//! peer comparison and their callers, the shared error type, and the
//! [`ValuationModel`] abstraction the implied-growth solver inverts.

/// The version of the alphaseeker-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod history;
pub mod model;
pub mod types;

// Re-exports
pub use error::{AlphaSeekerError, Result};
pub use history::PriceHistory;
pub use model::ValuationModel;
pub use types::{
    DEFAULT_PROJECTION_YEARS, Date, Ticker, ValuationInputs, ValuationResult, check_growth_rate,
};
