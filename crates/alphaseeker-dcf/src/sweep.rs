//! Implied growth across a grid of discount and terminal growth rates.

use crate::solver::{ImpliedGrowthSolver, SolverOutcome};
use alphaseeker_traits::{Result, ValuationInputs, ValuationModel};
use ndarray::Array2;
use rayon::prelude::*;
use tracing::debug;

/// Solver results for every `(discount_rate, terminal_growth_rate)` pair.
///
/// Row `i` holds `discount_rates[i]`, column `j` holds
/// `terminal_growth_rates[j]`. Cells that fail (for example where the discount
/// rate does not exceed the terminal growth rate) keep their error.
#[derive(Debug, Clone)]
pub struct SensitivityGrid {
    discount_rates: Vec<f64>,
    terminal_growth_rates: Vec<f64>,
    cells: Vec<Result<SolverOutcome>>,
}

impl SensitivityGrid {
    /// Discount rates along the rows.
    #[must_use]
    pub fn discount_rates(&self) -> &[f64] {
        &self.discount_rates
    }

    /// Terminal growth rates along the columns.
    #[must_use]
    pub fn terminal_growth_rates(&self) -> &[f64] {
        &self.terminal_growth_rates
    }

    /// `(rows, columns)`.
    #[must_use]
    pub fn shape(&self) -> (usize, usize) {
        (self.discount_rates.len(), self.terminal_growth_rates.len())
    }

    /// The result for row `i`, column `j`.
    #[must_use]
    pub fn get(&self, i: usize, j: usize) -> Option<&Result<SolverOutcome>> {
        let (rows, cols) = self.shape();
        if i < rows && j < cols { self.cells.get(i * cols + j) } else { None }
    }

    /// Iterate over `(discount_rate, terminal_growth_rate, result)` in row order.
    pub fn cells(&self) -> impl Iterator<Item = (f64, f64, &Result<SolverOutcome>)> + '_ {
        let cols = self.terminal_growth_rates.len();
        self.cells.iter().enumerate().map(move |(k, cell)| {
            (self.discount_rates[k / cols], self.terminal_growth_rates[k % cols], cell)
        })
    }

    /// Implied growth rates as a matrix, `NaN` where the solve failed or did
    /// not converge.
    #[must_use]
    pub fn implied_growth(&self) -> Array2<f64> {
        let (rows, cols) = self.shape();
        Array2::from_shape_fn((rows, cols), |(i, j)| match &self.cells[i * cols + j] {
            Ok(outcome) if outcome.converged => outcome.implied_growth_rate,
            _ => f64::NAN,
        })
    }

    /// Number of cells that produced a converged solve.
    #[must_use]
    pub fn converged_count(&self) -> usize {
        self.cells.iter().filter(|c| matches!(c, Ok(o) if o.converged)).count()
    }
}

/// Solve for implied growth at every pair of discount and terminal growth
/// rates, in parallel.
///
/// The base cash flow, horizon, and target come from `inputs`; its rates are
/// replaced per cell. Each cell is an independent solve, so failures stay
/// local to their cell.
pub fn sensitivity_grid<M: ValuationModel>(
    solver: &ImpliedGrowthSolver<M>,
    inputs: &ValuationInputs,
    discount_rates: &[f64],
    terminal_growth_rates: &[f64],
) -> SensitivityGrid {
    let cols = terminal_growth_rates.len();
    let cells: Vec<Result<SolverOutcome>> = (0..discount_rates.len() * cols)
        .into_par_iter()
        .map(|k| {
            let r = discount_rates[k / cols];
            let gt = terminal_growth_rates[k % cols];
            solver.solve(&inputs.with_rates(r, gt))
        })
        .collect();

    let grid = SensitivityGrid {
        discount_rates: discount_rates.to_vec(),
        terminal_growth_rates: terminal_growth_rates.to_vec(),
        cells,
    };
    debug!(
        rows = grid.shape().0,
        cols = grid.shape().1,
        converged = grid.converged_count(),
        "sensitivity grid solved"
    );
    grid
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SolverConfig;
    use alphaseeker_traits::AlphaSeekerError;
    use approx::assert_relative_eq;

    fn setup() -> (ImpliedGrowthSolver, ValuationInputs) {
        (
            ImpliedGrowthSolver::new(SolverConfig::default()),
            ValuationInputs::new(100.0, 0.10, 0.02, 5).with_target_value(1800.0),
        )
    }

    #[test]
    fn test_grid_matches_individual_solves() {
        let (solver, inputs) = setup();
        let discount = [0.08, 0.10, 0.12];
        let terminal = [0.01, 0.02];

        let grid = sensitivity_grid(&solver, &inputs, &discount, &terminal);
        assert_eq!(grid.shape(), (3, 2));

        let matrix = grid.implied_growth();
        for (i, &r) in discount.iter().enumerate() {
            for (j, &gt) in terminal.iter().enumerate() {
                let expected = solver.solve(&inputs.with_rates(r, gt)).unwrap();
                assert_relative_eq!(matrix[[i, j]], expected.implied_growth_rate);
                assert_eq!(grid.get(i, j).unwrap().as_ref().unwrap(), &expected);
            }
        }
    }

    #[test]
    fn test_higher_discount_needs_more_growth() {
        let (solver, inputs) = setup();
        let grid = sensitivity_grid(&solver, &inputs, &[0.08, 0.12], &[0.02]);
        let matrix = grid.implied_growth();
        assert!(matrix[[1, 0]] > matrix[[0, 0]]);
    }

    #[test]
    fn test_invalid_cells_are_nan() {
        let (solver, inputs) = setup();
        let grid = sensitivity_grid(&solver, &inputs, &[0.03, 0.10], &[0.03]);

        assert!(grid.implied_growth()[[0, 0]].is_nan());
        assert!(matches!(grid.get(0, 0), Some(Err(AlphaSeekerError::InvalidAssumption(_)))));
        assert!(grid.implied_growth()[[1, 0]].is_finite());
        assert_eq!(grid.converged_count(), 1);
    }

    #[test]
    fn test_cells_iterate_in_row_order() {
        let (solver, inputs) = setup();
        let grid = sensitivity_grid(&solver, &inputs, &[0.09, 0.11], &[0.01, 0.02]);
        let pairs: Vec<(f64, f64)> = grid.cells().map(|(r, gt, _)| (r, gt)).collect();
        assert_eq!(pairs, vec![(0.09, 0.01), (0.09, 0.02), (0.11, 0.01), (0.11, 0.02)]);
        assert!(grid.get(2, 0).is_none());
    }

    #[test]
    fn test_empty_axes() {
        let (solver, inputs) = setup();
        let grid = sensitivity_grid(&solver, &inputs, &[], &[0.02]);
        assert_eq!(grid.shape(), (0, 1));
        assert_eq!(grid.implied_growth().len(), 0);
    }
}
