//! Valuation model trait.
//!
//! A [`ValuationModel`] turns [`ValuationInputs`] into a [`ValuationResult`].
//! The implied-growth solver treats any model as a black-box objective
//! function, so the same bisection works for the standard two-stage DCF and
//! for any alternative model a caller plugs in.

use crate::{Result, ValuationInputs, ValuationResult};

/// A deterministic model that values a company from a small set of inputs.
///
/// Implementations must be pure: the same inputs always produce the same
/// result, and evaluation has no side effects. They must also be
/// thread-safe (`Send + Sync`) so sweeps can evaluate them in parallel.
///
/// For reverse solving to be well defined, [`value`](Self::value) should be
/// monotonically increasing in `inputs.growth_rate` whenever
/// [`validate`](Self::validate) accepts the inputs and the base cash flow is
/// positive.
///
/// # Example
///
/// ```no_run
/// use alphaseeker_traits::{Result, ValuationInputs, ValuationModel, ValuationResult};
///
/// struct NoTerminal;
///
/// impl ValuationModel for NoTerminal {
///     fn name(&self) -> &str {
///         "no_terminal"
///     }
///
///     fn validate(&self, inputs: &ValuationInputs) -> Result<()> {
///         inputs.validate()
///     }
///
///     fn value(&self, inputs: &ValuationInputs) -> Result<ValuationResult> {
///         let pv = inputs.base_cash_flow / (1.0 + inputs.discount_rate);
///         Ok(ValuationResult {
///             intrinsic_value: pv,
///             present_value_of_explicit_flows: pv,
///             present_value_of_terminal: 0.0,
///         })
///     }
/// }
/// ```
pub trait ValuationModel: Send + Sync {
    /// Returns the name of this model, used in logs and reports.
    fn name(&self) -> &str;

    /// Validate the assumptions shared by every evaluation of `inputs`.
    ///
    /// Solvers call this once before iterating, so an invalid assumption is
    /// reported up front rather than in the middle of a search.
    ///
    /// # Errors
    ///
    /// Returns an error describing the first violated assumption.
    fn validate(&self, inputs: &ValuationInputs) -> Result<()>;

    /// Value the company at `inputs.growth_rate`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inputs are invalid.
    fn value(&self, inputs: &ValuationInputs) -> Result<ValuationResult>;
}
