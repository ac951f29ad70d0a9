//! Implied growth sensitivity to the discounting assumptions.

use crate::output::{Format, banner, money, pct, print_json};
use alphaseeker_dcf::{ImpliedGrowthSolver, SensitivityGrid, SolverConfig, sensitivity_grid};
use alphaseeker_traits::{DEFAULT_PROJECTION_YEARS, ValuationInputs};
use anyhow::{Result, bail};
use clap::Args;
use ndarray::Array1;
use serde::Serialize;

#[derive(Debug, Args)]
pub(crate) struct SweepArgs {
    /// Latest annual free cash flow
    #[arg(long)]
    base_cash_flow: f64,

    /// Market value to match
    #[arg(long)]
    target: f64,

    /// Years of explicit projection
    #[arg(long, default_value_t = DEFAULT_PROJECTION_YEARS)]
    years: u32,

    /// Lowest discount rate
    #[arg(long, default_value_t = 0.05)]
    discount_from: f64,

    /// Highest discount rate
    #[arg(long, default_value_t = 0.15)]
    discount_to: f64,

    /// Discount rates in the sweep
    #[arg(long, default_value_t = 11)]
    discount_steps: usize,

    /// Lowest terminal growth rate
    #[arg(long, default_value_t = 0.01)]
    terminal_from: f64,

    /// Highest terminal growth rate
    #[arg(long, default_value_t = 0.05)]
    terminal_to: f64,

    /// Terminal growth rates in the sweep
    #[arg(long, default_value_t = 5)]
    terminal_steps: usize,
}

impl SweepArgs {
    fn axis(from: f64, to: f64, steps: usize, name: &str) -> Result<Vec<f64>> {
        if steps == 0 || !from.is_finite() || !to.is_finite() || from > to {
            bail!("{name} range must satisfy from <= to with at least one step");
        }
        if steps == 1 {
            return Ok(vec![from]);
        }
        Ok(Array1::linspace(from, to, steps).to_vec())
    }

    fn discount_rates(&self) -> Result<Vec<f64>> {
        Self::axis(self.discount_from, self.discount_to, self.discount_steps, "discount")
    }

    fn terminal_growth_rates(&self) -> Result<Vec<f64>> {
        Self::axis(self.terminal_from, self.terminal_to, self.terminal_steps, "terminal growth")
    }
}

#[derive(Serialize)]
struct SweepReport<'a> {
    base_cash_flow: f64,
    target_value: f64,
    projection_years: u32,
    discount_rates: &'a [f64],
    terminal_growth_rates: &'a [f64],
    /// Row per discount rate; `null` where no growth rate in the bracket fits.
    implied_growth: Vec<Vec<Option<f64>>>,
}

fn implied_rows(grid: &SensitivityGrid) -> Vec<Vec<Option<f64>>> {
    grid.implied_growth()
        .rows()
        .into_iter()
        .map(|row| row.iter().map(|&g| g.is_finite().then_some(g)).collect())
        .collect()
}

/// Solve the grid in parallel and print it as a matrix.
pub(crate) fn run(args: &SweepArgs, config: &SolverConfig, format: Format) -> Result<()> {
    let discount_rates = args.discount_rates()?;
    let terminal_growth_rates = args.terminal_growth_rates()?;
    let inputs = ValuationInputs::new(
        args.base_cash_flow,
        discount_rates[0],
        terminal_growth_rates[0],
        args.years,
    )
    .with_target_value(args.target);

    let solver = ImpliedGrowthSolver::new(*config);
    let grid = sensitivity_grid(&solver, &inputs, &discount_rates, &terminal_growth_rates);
    let rows = implied_rows(&grid);

    if format == Format::Json {
        return print_json(&SweepReport {
            base_cash_flow: args.base_cash_flow,
            target_value: args.target,
            projection_years: args.years,
            discount_rates: grid.discount_rates(),
            terminal_growth_rates: grid.terminal_growth_rates(),
            implied_growth: rows,
        });
    }

    banner("Implied growth sensitivity");
    println!(
        "Base cash flow {} | target {} | {} years\n",
        money(args.base_cash_flow),
        money(args.target),
        args.years
    );

    print!("{:>10} |", "r \\ gt");
    for gt in grid.terminal_growth_rates() {
        print!("{:>9}", pct(Some(*gt)));
    }
    println!();
    println!("{}", "─".repeat(12 + 9 * grid.terminal_growth_rates().len()));
    for (r, row) in grid.discount_rates().iter().zip(&rows) {
        print!("{:>10} |", pct(Some(*r)));
        for cell in row {
            match cell {
                Some(g) => print!("{:>9}", pct(Some(*g))),
                None => print!("{:>9}", "-"),
            }
        }
        println!();
    }

    let (n_rows, n_cols) = grid.shape();
    println!(
        "\n{} of {} cells solved ('-' = no rate in the bracket fits)\n",
        grid.converged_count(),
        n_rows * n_cols
    );
    Ok(())
}
