//! Market-implied growth versus delivered growth.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether the market price asks for more or less growth than the company has
/// historically delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrowthVerdict {
    /// Implied growth is below historical growth.
    Undervalued,
    /// Implied growth is at or above historical growth.
    Overvalued,
}

impl GrowthVerdict {
    /// Compare an implied growth rate with a historical one.
    ///
    /// Returns `None` if either rate is not finite.
    ///
    /// ```
    /// use alphaseeker_dcf::GrowthVerdict;
    ///
    /// assert_eq!(GrowthVerdict::assess(0.05, 0.12), Some(GrowthVerdict::Undervalued));
    /// assert_eq!(GrowthVerdict::assess(0.20, 0.12), Some(GrowthVerdict::Overvalued));
    /// ```
    #[must_use]
    pub fn assess(implied_growth_rate: f64, historical_growth_rate: f64) -> Option<Self> {
        if !implied_growth_rate.is_finite() || !historical_growth_rate.is_finite() {
            return None;
        }
        if implied_growth_rate < historical_growth_rate {
            Some(Self::Undervalued)
        } else {
            Some(Self::Overvalued)
        }
    }

    /// One-line reading of the verdict.
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::Undervalued => "market expects less growth than the company has delivered",
            Self::Overvalued => {
                "market expects at least as much growth as the company has delivered"
            }
        }
    }
}

impl fmt::Display for GrowthVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Undervalued => write!(f, "undervalued"),
            Self::Overvalued => write!(f, "overvalued"),
        }
    }
}
