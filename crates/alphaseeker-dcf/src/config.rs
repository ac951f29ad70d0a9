//! Solver configuration.

use alphaseeker_traits::{AlphaSeekerError, Result};
use serde::{Deserialize, Serialize};

/// Default lower end of the growth search bracket (-50% a year).
pub const DEFAULT_LOWER_BOUND: f64 = -0.50;

/// Default upper end of the growth search bracket (+50% a year).
pub const DEFAULT_UPPER_BOUND: f64 = 0.50;

/// Default relative tolerance, as a fraction of the target value.
pub const DEFAULT_RELATIVE_TOLERANCE: f64 = 1e-4;

/// Default iteration cap. Bisection over a unit-wide bracket reaches
/// sub-basis-point precision in well under this many steps.
pub const DEFAULT_MAX_ITERATIONS: usize = 100;

/// How close the model value must get to the target before the solver stops.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Tolerance {
    /// Fraction of the absolute target value.
    Relative(f64),
    /// Fixed amount in the units of the target value.
    Absolute(f64),
}

impl Tolerance {
    /// Resolve to an absolute threshold for the given target.
    #[must_use]
    pub fn resolve(&self, target: f64) -> f64 {
        match self {
            Self::Relative(fraction) => fraction * target.abs(),
            Self::Absolute(amount) => *amount,
        }
    }

    const fn raw(&self) -> f64 {
        match self {
            Self::Relative(v) | Self::Absolute(v) => *v,
        }
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::Relative(DEFAULT_RELATIVE_TOLERANCE)
    }
}

/// Configuration for the implied-growth solver.
///
/// Missing fields fall back to their defaults when deserializing, so a config
/// file only needs to mention what it changes.
///
/// # Example
///
/// ```
/// use alphaseeker_dcf::{SolverConfig, Tolerance};
///
/// let config: SolverConfig =
///     serde_json::from_str(r#"{ "upper_bound": 1.0, "max_iterations": 60 }"#).unwrap();
///
/// assert_eq!(config.lower_bound, -0.5);
/// assert_eq!(config.upper_bound, 1.0);
/// assert_eq!(config.tolerance, Tolerance::Relative(1e-4));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// Lowest annual growth rate searched (default: -0.50)
    pub lower_bound: f64,
    /// Highest annual growth rate searched (default: 0.50)
    pub upper_bound: f64,
    /// Convergence threshold (default: 1e-4 of the target value)
    pub tolerance: Tolerance,
    /// Iteration cap before returning an unconverged estimate (default: 100)
    pub max_iterations: usize,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            lower_bound: DEFAULT_LOWER_BOUND,
            upper_bound: DEFAULT_UPPER_BOUND,
            tolerance: Tolerance::default(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Return a copy searching `[lower, upper]`.
    #[must_use]
    pub const fn with_bracket(mut self, lower: f64, upper: f64) -> Self {
        self.lower_bound = lower;
        self.upper_bound = upper;
        self
    }

    /// Return a copy with the given tolerance.
    #[must_use]
    pub const fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Return a copy with the given iteration cap.
    #[must_use]
    pub const fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Check that the configuration describes a usable search.
    ///
    /// # Errors
    ///
    /// Returns [`AlphaSeekerError::InvalidInput`] if the bracket is not finite,
    /// reaches -100% growth, or is empty; if the tolerance is not positive; or
    /// if the iteration cap is zero.
    pub fn validate(&self) -> Result<()> {
        if !self.lower_bound.is_finite() || !self.upper_bound.is_finite() {
            return Err(AlphaSeekerError::InvalidInput(format!(
                "growth bracket must be finite, got [{}, {}]",
                self.lower_bound, self.upper_bound
            )));
        }

        if self.lower_bound <= -1.0 {
            return Err(AlphaSeekerError::InvalidInput(format!(
                "lower growth bound must exceed -100%, got {}",
                self.lower_bound
            )));
        }

        if self.lower_bound >= self.upper_bound {
            return Err(AlphaSeekerError::InvalidInput(format!(
                "lower growth bound {} must be below upper bound {}",
                self.lower_bound, self.upper_bound
            )));
        }

        let tolerance = self.tolerance.raw();
        if !tolerance.is_finite() || tolerance <= 0.0 {
            return Err(AlphaSeekerError::InvalidInput(format!(
                "tolerance must be positive, got {tolerance}"
            )));
        }

        if self.max_iterations == 0 {
            return Err(AlphaSeekerError::InvalidInput(
                "max iterations must be at least one".to_string(),
            ));
        }

        Ok(())
    }
}
