//! Value types shared by the valuation engine and its callers.
//!
//! Everything here is an immutable value object: built once by the caller,
//! read by the engine, never shared mutably.

use crate::{AlphaSeekerError, Result};
use serde::{Deserialize, Serialize};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A ticker symbol such as "AAPL".
pub type Ticker = String;

/// Default explicit projection horizon in years.
pub const DEFAULT_PROJECTION_YEARS: u32 = 10;

/// Inputs to a single discounted-cash-flow valuation.
///
/// `growth_rate` drives the explicit projection when the model is evaluated
/// directly. The implied-growth solver ignores it and searches for the rate
/// that makes the model value equal `target_value`.
///
/// # Example
///
/// ```
/// use alphaseeker_traits::ValuationInputs;
///
/// let inputs = ValuationInputs::new(100.0, 0.10, 0.02, 5)
///     .with_growth_rate(0.05)
///     .with_target_value(1800.0);
///
/// assert!(inputs.validate().is_ok());
/// assert_eq!(inputs.target_value, Some(1800.0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationInputs {
    /// Most recent annual free cash flow.
    pub base_cash_flow: f64,
    /// Constant annual growth over the explicit horizon.
    pub growth_rate: f64,
    /// Discount rate, a ratio in (0, 1).
    pub discount_rate: f64,
    /// Perpetual growth after the explicit horizon.
    pub terminal_growth_rate: f64,
    /// Number of explicitly projected years (at least one).
    pub projection_years: u32,
    /// Observed market value to back-solve against.
    pub target_value: Option<f64>,
}

impl ValuationInputs {
    /// Create inputs with zero explicit growth and no target.
    #[must_use]
    pub const fn new(
        base_cash_flow: f64,
        discount_rate: f64,
        terminal_growth_rate: f64,
        projection_years: u32,
    ) -> Self {
        Self {
            base_cash_flow,
            growth_rate: 0.0,
            discount_rate,
            terminal_growth_rate,
            projection_years,
            target_value: None,
        }
    }

    /// Build inputs for a reverse DCF from market data.
    ///
    /// The target is the market capitalization, `price * shares_outstanding`.
    ///
    /// # Errors
    ///
    /// Returns [`AlphaSeekerError::InvalidInput`] when price, share count or
    /// free cash flow is missing its meaning: non-finite, zero, or negative.
    pub fn from_market(
        price: f64,
        shares_outstanding: f64,
        free_cash_flow: f64,
        discount_rate: f64,
        terminal_growth_rate: f64,
        projection_years: u32,
    ) -> Result<Self> {
        for (name, value) in [
            ("price", price),
            ("shares outstanding", shares_outstanding),
            ("free cash flow", free_cash_flow),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(AlphaSeekerError::InvalidInput(format!(
                    "{name} must be positive for a reverse DCF, got {value}"
                )));
            }
        }

        Ok(
            Self::new(free_cash_flow, discount_rate, terminal_growth_rate, projection_years)
                .with_target_value(price * shares_outstanding),
        )
    }

    /// Return a copy with the given explicit growth rate.
    #[must_use]
    pub const fn with_growth_rate(mut self, growth_rate: f64) -> Self {
        self.growth_rate = growth_rate;
        self
    }

    /// Return a copy with the given target value.
    #[must_use]
    pub const fn with_target_value(mut self, target_value: f64) -> Self {
        self.target_value = Some(target_value);
        self
    }

    /// Return a copy with different discount and terminal growth rates.
    #[must_use]
    pub const fn with_rates(mut self, discount_rate: f64, terminal_growth_rate: f64) -> Self {
        self.discount_rate = discount_rate;
        self.terminal_growth_rate = terminal_growth_rate;
        self
    }

    /// Check the assumptions every valuation depends on.
    ///
    /// The explicit growth rate is not checked here; see
    /// [`validate_growth_rate`](Self::validate_growth_rate).
    ///
    /// # Errors
    ///
    /// - [`AlphaSeekerError::InvalidInput`] for non-finite numbers or a zero
    ///   projection horizon.
    /// - [`AlphaSeekerError::InvalidAssumption`] when the discount rate does
    ///   not exceed the terminal growth rate. This is checked before the
    ///   range of the discount rate, so `r = g_t = 0` is an assumption error.
    /// - [`AlphaSeekerError::InvalidInput`] for a discount rate outside (0, 1).
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("base cash flow", self.base_cash_flow),
            ("discount rate", self.discount_rate),
            ("terminal growth rate", self.terminal_growth_rate),
        ] {
            if !value.is_finite() {
                return Err(AlphaSeekerError::InvalidInput(format!(
                    "{name} must be finite, got {value}"
                )));
            }
        }

        if self.projection_years == 0 {
            return Err(AlphaSeekerError::InvalidInput(
                "projection horizon must be at least one year".to_string(),
            ));
        }

        if self.discount_rate <= self.terminal_growth_rate {
            return Err(AlphaSeekerError::InvalidAssumption(format!(
                "discount rate {} must exceed terminal growth rate {}",
                self.discount_rate, self.terminal_growth_rate
            )));
        }

        if self.discount_rate <= 0.0 || self.discount_rate >= 1.0 {
            return Err(AlphaSeekerError::InvalidInput(format!(
                "discount rate must lie in (0, 1), got {}",
                self.discount_rate
            )));
        }

        if let Some(target) = self.target_value
            && !target.is_finite()
        {
            return Err(AlphaSeekerError::InvalidInput(format!(
                "target value must be finite, got {target}"
            )));
        }

        Ok(())
    }

    /// Check that the explicit growth rate is usable for compounding.
    ///
    /// # Errors
    ///
    /// Returns [`AlphaSeekerError::InvalidInput`] when the rate is non-finite
    /// or at or below -100%.
    pub fn validate_growth_rate(&self) -> Result<()> {
        check_growth_rate(self.growth_rate)
    }
}

/// Check that a growth rate can be compounded.
///
/// Growth at or below -100% a year would zero out or flip the sign of
/// compounded cash flows.
///
/// # Errors
///
/// Returns [`AlphaSeekerError::InvalidInput`] for non-finite rates or rates
/// at or below -1.
pub fn check_growth_rate(growth_rate: f64) -> Result<()> {
    if !growth_rate.is_finite() || growth_rate <= -1.0 {
        return Err(AlphaSeekerError::InvalidInput(format!(
            "growth rate must be finite and greater than -100%, got {growth_rate}"
        )));
    }
    Ok(())
}

/// Output of one valuation pass.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Total intrinsic value: explicit flows plus terminal value, discounted.
    pub intrinsic_value: f64,
    /// Present value of the explicitly projected cash flows.
    pub present_value_of_explicit_flows: f64,
    /// Present value of the terminal value.
    pub present_value_of_terminal: f64,
}

impl ValuationResult {
    /// Share of intrinsic value that comes from beyond the explicit horizon.
    ///
    /// Returns `None` when the intrinsic value is zero.
    #[must_use]
    pub fn terminal_share(&self) -> Option<f64> {
        if self.intrinsic_value == 0.0 {
            None
        } else {
            Some(self.present_value_of_terminal / self.intrinsic_value)
        }
    }
}
