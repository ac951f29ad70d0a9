#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/alphaseeker/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! ## Crate Organization
//!
//! - [`traits`]: value types, [`ValuationModel`] and [`AlphaSeekerError`]
//! - [`dcf`]: forward DCF, implied growth solver, sensitivity sweep
//! - [`peers`]: EV/EBITDA multiples and peer ranking
//! - [`signals`]: revenue CAGR and technical snapshot
//! - [`fmp`]: Financial Modeling Prep client
//!
//! ## Architecture
//!
//! 1. **Data** comes from [`fmp`] (or the caller) as plain figures
//! 2. **Valuation** inverts a [`ValuationModel`] for the growth the price implies
//! 3. **Context** compares that growth with history and the company with peers
//!
//! The core crates do no I/O and keep no state between calls.

/// Version information for the alphaseeker crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// ============================================================================
// Core Types
// ============================================================================

/// Core types shared by every alphaseeker crate.
pub mod traits {
    pub use alphaseeker_traits::*;
}

pub use alphaseeker_traits::{
    AlphaSeekerError, Date, PriceHistory, Result, Ticker, ValuationInputs, ValuationModel,
    ValuationResult,
};

// ============================================================================
// Valuation
// ============================================================================

/// Two-stage DCF and the implied growth solver.
///
/// ## Forward model
///
/// ```text
/// value(g) = sum_{i=1..N} CF0 (1+g)^i / (1+r)^i
///          + CF0 (1+g)^N (1+g_t) / (r - g_t) / (1+r)^N
/// ```
///
/// ## Inverse
///
/// [`ImpliedGrowthSolver`](dcf::ImpliedGrowthSolver) bisects on `g` until
/// `value(g)` is within tolerance of the market value. `value` is increasing
/// in `g` for a positive base cash flow, so the root is unique when it exists.
///
/// # Example
///
/// ```
/// use alphaseeker::dcf::{SolveCache, ImpliedGrowthSolver, SolverConfig};
/// use alphaseeker::ValuationInputs;
///
/// let solver = ImpliedGrowthSolver::new(SolverConfig::default());
/// let mut cache = SolveCache::new();
///
/// let inputs = ValuationInputs::from_market(150.0, 1_000.0, 8_000.0, 0.09, 0.025, 10).unwrap();
/// let first = cache.solve(&solver, &inputs);
/// let again = cache.solve(&solver, &inputs);
/// assert_eq!(first, again);
/// assert_eq!(cache.hits(), 1);
/// ```
pub mod dcf {
    pub use alphaseeker_dcf::*;
}

// ============================================================================
// Peer Comparison
// ============================================================================

/// Peer metrics and ranking.
///
/// Each peer gets `EV / EBITDA` and a score of revenue growth per turn of that
/// multiple. Peers with non-positive EBITDA are excluded and reported.
pub mod peers {
    pub use alphaseeker_peers::*;
}

// ============================================================================
// Signals
// ============================================================================

/// Historical growth and technical indicators.
pub mod signals {
    pub use alphaseeker_signals::*;
}

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) API client.
///
/// ## Setup
///
/// 1. Get an API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add it to a `.env` file
pub mod fmp {
    pub use alphaseeker_fmp::*;
}

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```
/// use alphaseeker::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        AlphaSeekerError, Date, PriceHistory, Result, Ticker, ValuationInputs, ValuationModel,
        ValuationResult,
    };
    pub use alphaseeker_dcf::{
        DcfModel, GrowthVerdict, ImpliedGrowthSolver, SolveCache, SolverConfig, SolverOutcome,
        Tolerance, aggregate, project, sensitivity_grid, solve,
    };
    pub use alphaseeker_peers::{ComparisonRow, PeerComparison, PeerFinancials, compare};
    pub use alphaseeker_signals::{TechnicalConfig, TechnicalSnapshot, revenue_cagr};
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::prelude::*;
    use super::VERSION;

    #[test]
    fn test_version() {
        let parts: Vec<&str> = VERSION.split('.').collect();
        assert!(parts.len() >= 2, "Version should have at least major.minor");
    }

    #[test]
    fn test_re_exports() {
        fn _accept_model(_model: &dyn ValuationModel) {}
        _accept_model(&DcfModel::new());
    }

    #[test]
    fn test_market_value_round_trip() {
        // 1,000 shares at 30 against 100 of free cash flow.
        let inputs = ValuationInputs::from_market(30.0, 1_000.0, 100.0, 0.10, 0.03, 10).unwrap();
        let outcome = solve(&inputs, &SolverConfig::default()).unwrap();
        assert!(outcome.converged);

        let value = aggregate(&inputs.with_growth_rate(outcome.implied_growth_rate)).unwrap();
        assert!((value.intrinsic_value - 30_000.0).abs() <= 3.0);
    }
}
