//! Perpetuity-growth terminal value.

use alphaseeker_traits::{AlphaSeekerError, Result};

/// Value, at the end of the explicit horizon, of all later cash flows.
///
/// Uses the Gordon growth formula
/// `last * (1 + terminal_growth_rate) / (discount_rate - terminal_growth_rate)`.
/// The result is not discounted; the caller discounts it from the final
/// projection year.
///
/// # Errors
///
/// - [`AlphaSeekerError::InvalidAssumption`] when `discount_rate` does not
///   exceed `terminal_growth_rate`, where the perpetuity diverges.
/// - [`AlphaSeekerError::InvalidInput`] for non-finite arguments.
pub fn terminal_value(
    last_projected_cash_flow: f64,
    terminal_growth_rate: f64,
    discount_rate: f64,
) -> Result<f64> {
    if !last_projected_cash_flow.is_finite()
        || !terminal_growth_rate.is_finite()
        || !discount_rate.is_finite()
    {
        return Err(AlphaSeekerError::InvalidInput(
            "terminal value inputs must be finite".to_string(),
        ));
    }

    if discount_rate <= terminal_growth_rate {
        return Err(AlphaSeekerError::InvalidAssumption(format!(
            "perpetuity does not converge: discount rate {discount_rate} \
             <= terminal growth {terminal_growth_rate}"
        )));
    }

    Ok(last_projected_cash_flow * (1.0 + terminal_growth_rate)
        / (discount_rate - terminal_growth_rate))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_gordon_growth() {
        // 100 * 1.02 / 0.08
        assert_relative_eq!(terminal_value(100.0, 0.02, 0.10).unwrap(), 1275.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_terminal_growth_is_plain_perpetuity() {
        assert_relative_eq!(terminal_value(50.0, 0.0, 0.10).unwrap(), 500.0, epsilon = 1e-9);
    }

    #[test]
    fn test_equal_rates_rejected() {
        assert!(matches!(
            terminal_value(100.0, 0.05, 0.05),
            Err(AlphaSeekerError::InvalidAssumption(_))
        ));
    }

    #[test]
    fn test_terminal_above_discount_rejected() {
        assert!(matches!(
            terminal_value(100.0, 0.08, 0.05),
            Err(AlphaSeekerError::InvalidAssumption(_))
        ));
    }

    #[test]
    fn test_non_finite_rejected() {
        assert!(matches!(
            terminal_value(f64::INFINITY, 0.02, 0.10),
            Err(AlphaSeekerError::InvalidInput(_))
        ));
    }
}
