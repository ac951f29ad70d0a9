//! Historical and price-based signals for alphaseeker.
//!
//! - Growth: revenue CAGR and latest year-over-year growth from statements
//! - Technical: moving averages, RSI and a condensed [`TechnicalSnapshot`]
//!
//! These are the "what has the company delivered" and "what is the price
//! doing" readings that sit beside the reverse DCF.
//!
//! # Example
//!
//! ```
//! use alphaseeker_signals::{TechnicalConfig, TechnicalSnapshot};
//!
//! let closes: Vec<f64> = (0..60).map(|i| 100.0 + i as f64).collect();
//! let config = TechnicalConfig::default();
//! let snapshot = TechnicalSnapshot::from_closes(&closes, None, &config).unwrap();
//! assert!(snapshot.sma_short.is_some());
//! assert!(snapshot.sma_long.is_none());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod growth;
pub mod technical;

// Re-export key types
pub use growth::{latest_growth, revenue_cagr};
pub use technical::{
    RsiZone, TechnicalConfig, TechnicalSnapshot, Trend, relative_strength_index,
    simple_moving_average,
};
