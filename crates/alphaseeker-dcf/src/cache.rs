//! Memoized implied-growth solves.
//!
//! A [`SolveCache`] is owned by the caller and passed explicitly; nothing in
//! this crate keeps shared state between solves. Both successes and failures
//! are memoized, so a screen that revisits an unreachable target does not
//! bisect again.
//!
//! The cache grows without bound unless built with
//! [`SolveCache::with_max_entries`]; otherwise the caller decides when to
//! [`clear`](SolveCache::clear) it.

use crate::{
    config::{SolverConfig, Tolerance},
    solver::{ImpliedGrowthSolver, SolverOutcome},
};
use alphaseeker_traits::{Result, ValuationInputs, ValuationModel};
use std::collections::HashMap;
use tracing::{debug, trace};

/// Hashable identity of one solve.
///
/// Floats are keyed by bit pattern with `-0.0` folded into `0.0`. The explicit
/// growth rate is left out because the solver overwrites it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SolveKey {
    model: String,
    base_cash_flow: u64,
    discount_rate: u64,
    terminal_growth_rate: u64,
    projection_years: u32,
    target_value: Option<u64>,
    lower_bound: u64,
    upper_bound: u64,
    tolerance: (bool, u64),
    max_iterations: usize,
}

fn bits(value: f64) -> u64 {
    if value == 0.0 { 0.0_f64.to_bits() } else { value.to_bits() }
}

impl SolveKey {
    fn new(model: &str, inputs: &ValuationInputs, config: &SolverConfig) -> Self {
        let tolerance = match config.tolerance {
            Tolerance::Relative(v) => (true, bits(v)),
            Tolerance::Absolute(v) => (false, bits(v)),
        };
        Self {
            model: model.to_string(),
            base_cash_flow: bits(inputs.base_cash_flow),
            discount_rate: bits(inputs.discount_rate),
            terminal_growth_rate: bits(inputs.terminal_growth_rate),
            projection_years: inputs.projection_years,
            target_value: inputs.target_value.map(bits),
            lower_bound: bits(config.lower_bound),
            upper_bound: bits(config.upper_bound),
            tolerance,
            max_iterations: config.max_iterations,
        }
    }
}

/// Caller-owned memo of solver results keyed by their inputs.
#[derive(Debug, Default)]
pub struct SolveCache {
    entries: HashMap<SolveKey, Result<SolverOutcome>>,
    max_entries: Option<usize>,
    hits: usize,
    misses: usize,
}

impl SolveCache {
    /// Create an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache holding at most `max_entries` solves.
    ///
    /// When a new solve would exceed the bound, every entry is dropped first.
    /// A bound of zero disables memoization.
    #[must_use]
    pub fn with_max_entries(max_entries: usize) -> Self {
        Self { max_entries: Some(max_entries), ..Self::default() }
    }

    /// Solve through the cache.
    ///
    /// Returns exactly what `solver.solve(inputs)` would, computing it at most
    /// once per distinct set of inputs and solver configuration.
    ///
    /// # Errors
    ///
    /// See [`ImpliedGrowthSolver::solve`].
    pub fn solve<M: ValuationModel>(
        &mut self,
        solver: &ImpliedGrowthSolver<M>,
        inputs: &ValuationInputs,
    ) -> Result<SolverOutcome> {
        let key = SolveKey::new(solver.model().name(), inputs, solver.config());

        if let Some(cached) = self.entries.get(&key) {
            self.hits += 1;
            trace!(hits = self.hits, "solve cache hit");
            return cached.clone();
        }

        self.misses += 1;
        let result = solver.solve(inputs);
        match self.max_entries {
            Some(0) => {}
            Some(max) if self.entries.len() >= max => {
                debug!(entries = self.entries.len(), "solve cache full, flushing");
                self.entries.clear();
                self.entries.insert(key, result.clone());
            }
            _ => {
                self.entries.insert(key, result.clone());
            }
        }
        result
    }

    /// Number of memoized solves.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether nothing has been memoized yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lookups answered from the cache.
    #[must_use]
    pub const fn hits(&self) -> usize {
        self.hits
    }

    /// Lookups that ran the solver.
    #[must_use]
    pub const fn misses(&self) -> usize {
        self.misses
    }

    /// Entry bound, if any.
    #[must_use]
    pub const fn max_entries(&self) -> Option<usize> {
        self.max_entries
    }

    /// Drop every entry and reset the counters.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphaseeker_traits::AlphaSeekerError;

    fn inputs() -> ValuationInputs {
        ValuationInputs::new(100.0, 0.10, 0.02, 5).with_target_value(1800.0)
    }

    #[test]
    fn test_hit_returns_same_outcome() {
        let solver = ImpliedGrowthSolver::new(SolverConfig::default());
        let mut cache = SolveCache::new();

        let first = cache.solve(&solver, &inputs()).unwrap();
        let second = cache.solve(&solver, &inputs()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first, solver.solve(&inputs()).unwrap());
        assert_eq!(cache.len(), 1);
        assert_eq!((cache.hits(), cache.misses()), (1, 1));
    }

    #[test]
    fn test_growth_rate_does_not_split_entries() {
        let solver = ImpliedGrowthSolver::new(SolverConfig::default());
        let mut cache = SolveCache::new();

        cache.solve(&solver, &inputs()).unwrap();
        cache.solve(&solver, &inputs().with_growth_rate(0.2)).unwrap();

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_config_and_target_split_entries() {
        let default = ImpliedGrowthSolver::new(SolverConfig::default());
        let narrow = ImpliedGrowthSolver::new(SolverConfig::default().with_bracket(0.0, 0.4));
        let mut cache = SolveCache::new();

        cache.solve(&default, &inputs()).unwrap();
        cache.solve(&narrow, &inputs()).unwrap();
        cache.solve(&default, &inputs().with_target_value(2000.0)).unwrap();

        assert_eq!(cache.len(), 3);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn test_errors_are_memoized() {
        let solver = ImpliedGrowthSolver::new(SolverConfig::default());
        let mut cache = SolveCache::new();
        let unreachable = inputs().with_target_value(1.0e9);

        let first = cache.solve(&solver, &unreachable).unwrap_err();
        let second = cache.solve(&solver, &unreachable).unwrap_err();

        assert!(matches!(first, AlphaSeekerError::NoRootInBracket { .. }));
        assert_eq!(first, second);
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_clear() {
        let solver = ImpliedGrowthSolver::new(SolverConfig::default());
        let mut cache = SolveCache::new();
        cache.solve(&solver, &inputs()).unwrap();

        cache.clear();
        assert!(cache.is_empty());
        assert_eq!((cache.hits(), cache.misses()), (0, 0));
    }

    #[test]
    fn test_bounded_cache_flushes_when_full() {
        let solver = ImpliedGrowthSolver::new(SolverConfig::default());
        let mut cache = SolveCache::with_max_entries(2);

        for target in [1500.0, 1800.0, 2100.0] {
            cache.solve(&solver, &inputs().with_target_value(target)).unwrap();
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.max_entries(), Some(2));

        let again = cache.solve(&solver, &inputs().with_target_value(2100.0)).unwrap();
        assert_eq!(again, solver.solve(&inputs().with_target_value(2100.0)).unwrap());
        assert_eq!(cache.hits(), 1);
    }

    #[test]
    fn test_zero_bound_never_stores() {
        let solver = ImpliedGrowthSolver::new(SolverConfig::default());
        let mut cache = SolveCache::with_max_entries(0);
        cache.solve(&solver, &inputs()).unwrap();
        cache.solve(&solver, &inputs()).unwrap();
        assert!(cache.is_empty());
        assert_eq!(cache.misses(), 2);
    }
}
