//! Discounting projected flows and the terminal value to present value.

use crate::{projection::project, terminal::terminal_value};
use alphaseeker_traits::{Result, ValuationInputs, ValuationModel, ValuationResult};

/// Value a company with a two-stage DCF.
///
/// Year *i* cash flow is discounted by `(1 + discount_rate)^i`. The terminal
/// value is anchored at the final projection year and discounted by
/// `(1 + discount_rate)^projection_years`.
///
/// Runs in O(`projection_years`) with no iteration.
///
/// # Errors
///
/// Returns the error from [`ValuationInputs::validate`] or from the explicit
/// growth rate check.
///
/// # Example
///
/// ```
/// use alphaseeker_dcf::aggregate;
/// use alphaseeker_traits::ValuationInputs;
///
/// let result = aggregate(&ValuationInputs::new(100.0, 0.10, 0.02, 5)).unwrap();
/// assert!((result.intrinsic_value - 1170.75).abs() < 0.01);
/// ```
pub fn aggregate(inputs: &ValuationInputs) -> Result<ValuationResult> {
    inputs.validate()?;

    let flows = project(inputs.base_cash_flow, inputs.growth_rate, inputs.projection_years)?;

    let growth_factor = 1.0 + inputs.discount_rate;
    let mut discount_factor = 1.0;
    let mut present_value_of_explicit_flows = 0.0;
    for flow in &flows {
        discount_factor *= growth_factor;
        present_value_of_explicit_flows += flow.amount / discount_factor;
    }

    let last = flows.last().map_or(inputs.base_cash_flow, |f| f.amount);
    let terminal = terminal_value(last, inputs.terminal_growth_rate, inputs.discount_rate)?;
    let present_value_of_terminal = terminal / discount_factor;

    Ok(ValuationResult {
        intrinsic_value: present_value_of_explicit_flows + present_value_of_terminal,
        present_value_of_explicit_flows,
        present_value_of_terminal,
    })
}

/// Two-stage DCF: explicit constant-growth years, then a growing perpetuity.
///
/// This is the [`ValuationModel`] the implied-growth solver uses by default.
#[derive(Debug, Clone, Copy, Default)]
pub struct DcfModel;

impl DcfModel {
    /// Create the model.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl ValuationModel for DcfModel {
    fn name(&self) -> &str {
        "two_stage_dcf"
    }

    fn validate(&self, inputs: &ValuationInputs) -> Result<()> {
        inputs.validate()
    }

    fn value(&self, inputs: &ValuationInputs) -> Result<ValuationResult> {
        aggregate(inputs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphaseeker_traits::AlphaSeekerError;
    use approx::assert_relative_eq;

    fn base_inputs() -> ValuationInputs {
        ValuationInputs::new(100.0, 0.10, 0.02, 5)
    }

    #[test]
    fn test_zero_growth_by_hand() {
        let result = aggregate(&base_inputs()).unwrap();

        let annuity: f64 = (1..=5).map(|i| 100.0 / 1.1_f64.powi(i)).sum();
        let terminal = 100.0 * 1.02 / 0.08 / 1.1_f64.powi(5);

        assert_relative_eq!(result.present_value_of_explicit_flows, annuity, epsilon = 1e-9);
        assert_relative_eq!(result.present_value_of_terminal, terminal, epsilon = 1e-9);
        assert_relative_eq!(result.intrinsic_value, annuity + terminal, epsilon = 1e-9);
    }

    #[test]
    fn test_growth_compounds_into_terminal() {
        let result = aggregate(&base_inputs().with_growth_rate(0.10)).unwrap();

        // Every explicit flow discounts back to exactly 100 when g == r.
        assert_relative_eq!(result.present_value_of_explicit_flows, 500.0, epsilon = 1e-9);

        let last = 100.0 * 1.1_f64.powi(5);
        let terminal = last * 1.02 / 0.08 / 1.1_f64.powi(5);
        assert_relative_eq!(result.present_value_of_terminal, terminal, epsilon = 1e-9);
    }

    #[test]
    fn test_higher_growth_is_worth_more() {
        let low = aggregate(&base_inputs().with_growth_rate(0.02)).unwrap();
        let high = aggregate(&base_inputs().with_growth_rate(0.08)).unwrap();
        assert!(high.intrinsic_value > low.intrinsic_value);
    }

    #[test]
    fn test_invalid_assumption_surfaces() {
        let inputs = ValuationInputs::new(100.0, 0.03, 0.03, 5);
        assert!(matches!(aggregate(&inputs), Err(AlphaSeekerError::InvalidAssumption(_))));
    }

    #[test]
    fn test_model_delegates_to_aggregate() {
        let model = DcfModel::new();
        let inputs = base_inputs().with_growth_rate(0.04);
        assert_eq!(model.name(), "two_stage_dcf");
        assert_eq!(model.value(&inputs).unwrap(), aggregate(&inputs).unwrap());
        assert!(model.validate(&inputs).is_ok());
    }
}
