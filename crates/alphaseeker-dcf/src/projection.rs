//! Explicit-period cash flow projection.

use alphaseeker_traits::{AlphaSeekerError, Result, check_growth_rate};
use serde::Serialize;

/// Cash flow projected for one year of the explicit horizon.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedCashFlow {
    /// Year index, starting at 1.
    pub year: u32,
    /// Projected free cash flow for that year.
    pub amount: f64,
}

/// Projected free cash flows for years `1..=n`, in order.
///
/// Only [`project`] builds this type, and it exposes no mutable access, so a
/// projection always matches the inputs it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectedCashFlows {
    flows: Vec<ProjectedCashFlow>,
}

impl ProjectedCashFlows {
    /// Number of projected years.
    #[must_use]
    pub fn len(&self) -> usize {
        self.flows.len()
    }

    /// Whether the projection is empty. Never true for a projection built by
    /// [`project`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }

    /// The projected flows, year 1 first.
    #[must_use]
    pub fn as_slice(&self) -> &[ProjectedCashFlow] {
        &self.flows
    }

    /// Iterate over the projected flows in year order.
    pub fn iter(&self) -> std::slice::Iter<'_, ProjectedCashFlow> {
        self.flows.iter()
    }

    /// The final projected year.
    #[must_use]
    pub fn last(&self) -> Option<&ProjectedCashFlow> {
        self.flows.last()
    }

    /// Just the amounts, year 1 first.
    #[must_use]
    pub fn amounts(&self) -> Vec<f64> {
        self.flows.iter().map(|f| f.amount).collect()
    }
}

impl<'a> IntoIterator for &'a ProjectedCashFlows {
    type Item = &'a ProjectedCashFlow;
    type IntoIter = std::slice::Iter<'a, ProjectedCashFlow>;

    fn into_iter(self) -> Self::IntoIter {
        self.flows.iter()
    }
}

/// Project `years` of free cash flow growing at a constant rate.
///
/// Year *i* is `base_cash_flow * (1 + growth_rate)^i`.
///
/// # Errors
///
/// Returns [`AlphaSeekerError::InvalidInput`] if `years` is zero, the base
/// cash flow is not finite, or the growth rate is at or below -100%.
///
/// # Example
///
/// ```
/// use alphaseeker_dcf::project;
///
/// let flows = project(100.0, 0.10, 3).unwrap();
/// assert_eq!(flows.len(), 3);
/// assert!((flows.last().unwrap().amount - 133.1).abs() < 1e-9);
/// ```
pub fn project(base_cash_flow: f64, growth_rate: f64, years: u32) -> Result<ProjectedCashFlows> {
    if years == 0 {
        return Err(AlphaSeekerError::InvalidInput(
            "projection horizon must be at least one year".to_string(),
        ));
    }
    if !base_cash_flow.is_finite() {
        return Err(AlphaSeekerError::InvalidInput(format!(
            "base cash flow must be finite, got {base_cash_flow}"
        )));
    }
    check_growth_rate(growth_rate)?;

    let mut amount = base_cash_flow;
    let flows = (1..=years)
        .map(|year| {
            amount *= 1.0 + growth_rate;
            ProjectedCashFlow { year, amount }
        })
        .collect();

    Ok(ProjectedCashFlows { flows })
}
