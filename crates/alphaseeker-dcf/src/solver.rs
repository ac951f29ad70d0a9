//! Implied growth solver (reverse DCF).
//!
//! Finds the explicit-period growth rate at which a valuation model reproduces
//! an observed market value. The objective
//! `f(g) = value(inputs with g) - target` increases monotonically with `g`
//! for a positive base cash flow and a convergent perpetuity, so a bracketing
//! bisection always finds the unique root when the bracket contains one and
//! never diverges near the discount/terminal-growth asymptote.

use crate::{aggregate::DcfModel, config::SolverConfig};
use alphaseeker_traits::{AlphaSeekerError, Result, ValuationInputs, ValuationModel};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Result of one implied-growth solve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverOutcome {
    /// Growth rate at which the model value is closest to the target.
    pub implied_growth_rate: f64,
    /// Bisection steps taken (0 when a bracket end already matched).
    pub iterations: usize,
    /// Whether the residual fell within tolerance.
    pub converged: bool,
    /// Model value minus target at `implied_growth_rate`.
    pub residual: f64,
}

/// Bisection solver for the growth rate implied by a target value.
///
/// The solver is stateless: every [`solve`](Self::solve) call reads only its
/// own inputs, so one solver can be shared across threads.
///
/// # Example
///
/// ```
/// use alphaseeker_dcf::{ImpliedGrowthSolver, SolverConfig, aggregate};
/// use alphaseeker_traits::ValuationInputs;
///
/// let solver = ImpliedGrowthSolver::new(SolverConfig::default());
/// let inputs = ValuationInputs::new(100.0, 0.10, 0.02, 5).with_target_value(1800.0);
///
/// let outcome = solver.solve(&inputs).unwrap();
/// assert!(outcome.converged);
///
/// let value = aggregate(&inputs.with_growth_rate(outcome.implied_growth_rate)).unwrap();
/// assert!((value.intrinsic_value - 1800.0).abs() < 0.18);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ImpliedGrowthSolver<M = DcfModel> {
    model: M,
    config: SolverConfig,
}

impl ImpliedGrowthSolver<DcfModel> {
    /// Create a solver over the standard two-stage DCF.
    #[must_use]
    pub const fn new(config: SolverConfig) -> Self {
        Self {
            model: DcfModel,
            config,
        }
    }
}

impl<M: ValuationModel> ImpliedGrowthSolver<M> {
    /// Create a solver over a custom valuation model.
    #[must_use]
    pub const fn with_model(model: M, config: SolverConfig) -> Self {
        Self { model, config }
    }

    /// The solver configuration.
    #[must_use]
    pub const fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// The model being inverted.
    #[must_use]
    pub const fn model(&self) -> &M {
        &self.model
    }

    /// Find the growth rate at which the model value equals the target.
    ///
    /// All assumptions are validated before the first evaluation. Running out
    /// of iterations is not an error: the best estimate is returned with
    /// `converged == false`, and callers must check that flag.
    ///
    /// # Errors
    ///
    /// - [`AlphaSeekerError::InvalidAssumption`] if the discount rate does not
    ///   exceed the terminal growth rate.
    /// - [`AlphaSeekerError::InvalidInput`] if the configuration is unusable,
    ///   the target is missing or not positive, or the base cash flow is not
    ///   positive.
    /// - [`AlphaSeekerError::NoRootInBracket`] if the model value has the same
    ///   side of the target at both ends of the bracket.
    pub fn solve(&self, inputs: &ValuationInputs) -> Result<SolverOutcome> {
        self.config.validate()?;
        self.model.validate(inputs)?;

        let target = inputs.target_value.ok_or_else(|| {
            AlphaSeekerError::InvalidInput("a target value is required to solve for growth".into())
        })?;
        if target <= 0.0 {
            return Err(AlphaSeekerError::InvalidInput(format!(
                "target value must be positive, got {target}"
            )));
        }
        if inputs.base_cash_flow <= 0.0 {
            return Err(AlphaSeekerError::InvalidInput(format!(
                "implied growth is undefined for a non-positive base cash flow ({})",
                inputs.base_cash_flow
            )));
        }

        let tolerance = self.config.tolerance.resolve(target);
        let objective = |growth_rate: f64| -> Result<f64> {
            let value = self.model.value(&inputs.with_growth_rate(growth_rate))?;
            let residual = value.intrinsic_value - target;
            if residual.is_nan() {
                return Err(AlphaSeekerError::InvalidInput(format!(
                    "model value is undefined at growth rate {growth_rate}"
                )));
            }
            Ok(residual)
        };

        let mut lower = self.config.lower_bound;
        let mut upper = self.config.upper_bound;
        let mut f_lower = objective(lower)?;
        let f_upper = objective(upper)?;

        for (rate, residual) in [(lower, f_lower), (upper, f_upper)] {
            if residual.abs() < tolerance {
                return Ok(self.finish(rate, 0, true, residual));
            }
        }

        if (f_lower < 0.0) == (f_upper < 0.0) {
            return Err(AlphaSeekerError::NoRootInBracket {
                lower,
                upper,
                value_at_lower: f_lower + target,
                value_at_upper: f_upper + target,
                target,
            });
        }

        let mut best = if f_lower.abs() <= f_upper.abs() {
            (lower, f_lower)
        } else {
            (upper, f_upper)
        };

        for iteration in 1..=self.config.max_iterations {
            let mid = lower + (upper - lower) / 2.0;
            let f_mid = objective(mid)?;

            if f_mid.abs() < best.1.abs() {
                best = (mid, f_mid);
            }
            if f_mid.abs() < tolerance {
                return Ok(self.finish(mid, iteration, true, f_mid));
            }

            if (f_mid < 0.0) == (f_lower < 0.0) {
                lower = mid;
                f_lower = f_mid;
            } else {
                upper = mid;
            }
        }

        Ok(self.finish(best.0, self.config.max_iterations, false, best.1))
    }

    fn finish(
        &self,
        rate: f64,
        iterations: usize,
        converged: bool,
        residual: f64,
    ) -> SolverOutcome {
        debug!(
            model = self.model.name(),
            implied_growth_rate = rate,
            iterations,
            converged,
            residual,
            "implied growth solve finished"
        );
        SolverOutcome {
            implied_growth_rate: rate,
            iterations,
            converged,
            residual,
        }
    }
}

/// Solve for implied growth with the standard DCF model.
///
/// Shorthand for `ImpliedGrowthSolver::new(*config).solve(inputs)`.
///
/// # Errors
///
/// See [`ImpliedGrowthSolver::solve`].
pub fn solve(inputs: &ValuationInputs, config: &SolverConfig) -> Result<SolverOutcome> {
    ImpliedGrowthSolver::new(*config).solve(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{aggregate::aggregate, config::Tolerance};
    use alphaseeker_traits::ValuationResult;
    use approx::assert_relative_eq;

    fn scenario() -> ValuationInputs {
        ValuationInputs::new(100.0, 0.10, 0.02, 5).with_target_value(1800.0)
    }

    #[test]
    fn test_reference_scenario_converges() {
        let outcome = solve(&scenario(), &SolverConfig::default()).unwrap();

        assert!(outcome.converged);
        assert!(outcome.iterations > 0 && outcome.iterations <= 100);
        assert!(outcome.residual.abs() < 0.18);

        let value = aggregate(&scenario().with_growth_rate(outcome.implied_growth_rate)).unwrap();
        assert!((value.intrinsic_value - 1800.0).abs() < 0.18);
        // 1800 is above the zero-growth value of ~1170.75, so growth is positive.
        assert!(outcome.implied_growth_rate > 0.0 && outcome.implied_growth_rate < 0.5);
    }

    #[test]
    fn test_equal_rates_rejected_before_iterating() {
        let inputs = ValuationInputs::new(100.0, 0.05, 0.05, 5).with_target_value(1800.0);
        let result = solve(&inputs, &SolverConfig::default());
        assert!(matches!(result, Err(AlphaSeekerError::InvalidAssumption(_))));
    }

    #[test]
    fn test_unreachable_target() {
        let inputs = scenario().with_target_value(1.0e9);
        match solve(&inputs, &SolverConfig::default()) {
            Err(AlphaSeekerError::NoRootInBracket {
                lower,
                upper,
                value_at_upper,
                target,
                ..
            }) => {
                assert_relative_eq!(lower, -0.5);
                assert_relative_eq!(upper, 0.5);
                assert!(value_at_upper < target);
            }
            other => panic!("expected NoRootInBracket, got {other:?}"),
        }
    }

    #[test]
    fn test_target_below_bracket() {
        let inputs = scenario().with_target_value(1.0);
        let err = solve(&inputs, &SolverConfig::default()).unwrap_err();
        assert!(err.is_valuation_signal());
    }

    #[test]
    fn test_missing_target() {
        let inputs = ValuationInputs::new(100.0, 0.10, 0.02, 5);
        assert!(matches!(
            solve(&inputs, &SolverConfig::default()),
            Err(AlphaSeekerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_non_positive_cash_flow_rejected() {
        let inputs = ValuationInputs::new(-100.0, 0.10, 0.02, 5).with_target_value(1800.0);
        assert!(matches!(
            solve(&inputs, &SolverConfig::default()),
            Err(AlphaSeekerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_exhausted_iterations_returns_best_estimate() {
        let config = SolverConfig::default()
            .with_tolerance(Tolerance::Absolute(1e-12))
            .with_max_iterations(3);
        let outcome = solve(&scenario(), &config).unwrap();

        assert!(!outcome.converged);
        assert_eq!(outcome.iterations, 3);
        assert!(outcome.residual.abs() > 1e-12);

        let value = aggregate(&scenario().with_growth_rate(outcome.implied_growth_rate)).unwrap();
        assert_relative_eq!(value.intrinsic_value - 1800.0, outcome.residual, epsilon = 1e-6);
    }

    #[test]
    fn test_bracket_end_matches_exactly() {
        let at_zero = aggregate(&scenario()).unwrap().intrinsic_value;
        let config = SolverConfig::default().with_bracket(0.0, 0.5);
        let outcome = solve(&scenario().with_target_value(at_zero), &config).unwrap();

        assert!(outcome.converged);
        assert_eq!(outcome.iterations, 0);
        assert_relative_eq!(outcome.implied_growth_rate, 0.0);
    }

    #[test]
    fn test_growth_rate_in_inputs_is_ignored() {
        let a = solve(&scenario(), &SolverConfig::default()).unwrap();
        let b = solve(&scenario().with_growth_rate(0.3), &SolverConfig::default()).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_custom_bracket() {
        let config = SolverConfig::default().with_bracket(-0.2, 1.0);
        let inputs = scenario().with_target_value(10_000.0);
        let outcome = solve(&inputs, &config).unwrap();
        assert!(outcome.converged);
        assert!(outcome.implied_growth_rate > 0.5);
    }

    struct Linear;

    impl ValuationModel for Linear {
        fn name(&self) -> &str {
            "linear"
        }

        fn validate(&self, inputs: &ValuationInputs) -> Result<()> {
            inputs.validate()
        }

        fn value(&self, inputs: &ValuationInputs) -> Result<ValuationResult> {
            let v = inputs.base_cash_flow * (1.0 + inputs.growth_rate);
            Ok(ValuationResult {
                intrinsic_value: v,
                present_value_of_explicit_flows: v,
                present_value_of_terminal: 0.0,
            })
        }
    }

    #[test]
    fn test_custom_model() {
        let solver = ImpliedGrowthSolver::with_model(
            Linear,
            SolverConfig::default().with_tolerance(Tolerance::Absolute(1e-9)),
        );
        let inputs = ValuationInputs::new(100.0, 0.10, 0.02, 5).with_target_value(125.0);
        let outcome = solver.solve(&inputs).unwrap();

        assert!(outcome.converged);
        assert_eq!(solver.model().name(), "linear");
        assert_relative_eq!(outcome.implied_growth_rate, 0.25, epsilon = 1e-9);
    }
}
