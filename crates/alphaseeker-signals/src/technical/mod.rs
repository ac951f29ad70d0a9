//! Price-based technical indicators.
//!
//! - Simple moving averages over short and long windows (50 and 200 days)
//! - Relative strength index over 14 days, with 70/30 zone thresholds
//!
//! [`TechnicalSnapshot`] condenses a [`PriceHistory`](alphaseeker_traits::PriceHistory)
//! into the latest reading of each, ready to be explained or serialized.

mod indicators;
mod snapshot;

pub use indicators::{relative_strength_index, simple_moving_average};
pub use snapshot::{RsiZone, TechnicalConfig, TechnicalSnapshot, Trend};
