//! CLI subcommand modules.
//!
//! This module contains the implementations for all alphaseeker CLI subcommands.

pub(crate) mod dcf;
pub(crate) mod ownership;
pub(crate) mod peers;
pub(crate) mod sweep;
pub(crate) mod technicals;
pub(crate) mod value;

use crate::output::{Format, print_json};
use alphaseeker_dcf::{ImpliedGrowthSolver, SolverConfig, SolverOutcome};
use alphaseeker_traits::{AlphaSeekerError, DEFAULT_PROJECTION_YEARS, ValuationInputs};
use anyhow::Result;
use clap::Args;
use serde::Serialize;
use tracing::warn;

/// Discounting assumptions shared by the valuation commands.
#[derive(Debug, Clone, Args)]
pub(crate) struct AssumptionArgs {
    /// Annual discount rate (0.10 = 10%)
    #[arg(long, default_value_t = 0.10)]
    pub(crate) discount_rate: f64,

    /// Perpetual growth after the explicit horizon
    #[arg(long, default_value_t = 0.03)]
    pub(crate) terminal_growth: f64,

    /// Years of explicit projection
    #[arg(long, default_value_t = DEFAULT_PROJECTION_YEARS)]
    pub(crate) years: u32,
}

/// Machine-readable form of a target no growth rate in the bracket reaches.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub(crate) struct ImplausibleReport {
    pub(crate) ticker: String,
    pub(crate) implausible: bool,
    pub(crate) error: String,
    pub(crate) lower: f64,
    pub(crate) upper: f64,
    pub(crate) value_at_lower: f64,
    pub(crate) value_at_upper: f64,
    pub(crate) target: f64,
}

impl ImplausibleReport {
    /// `None` unless `err` is an unreachable-target signal.
    pub(crate) fn from_error(ticker: &str, err: &AlphaSeekerError) -> Option<Self> {
        match *err {
            AlphaSeekerError::NoRootInBracket {
                lower,
                upper,
                value_at_lower,
                value_at_upper,
                target,
            } => Some(Self {
                ticker: ticker.to_string(),
                implausible: true,
                error: err.to_string(),
                lower,
                upper,
                value_at_lower,
                value_at_upper,
                target,
            }),
            _ => None,
        }
    }
}

/// Solve, turning an unreachable target into `Ok(None)` after reporting it.
///
/// In JSON mode the report goes to stdout as an [`ImplausibleReport`]; in
/// text mode the notice goes to stderr. Other errors propagate.
pub(crate) fn solve_or_report(
    ticker: &str,
    inputs: &ValuationInputs,
    config: &SolverConfig,
    format: Format,
) -> Result<Option<SolverOutcome>> {
    let err = match ImpliedGrowthSolver::new(*config).solve(inputs) {
        Ok(outcome) => {
            if !outcome.converged {
                warn!(
                    iterations = outcome.iterations,
                    residual = outcome.residual,
                    "solver stopped before reaching tolerance; showing best estimate"
                );
            }
            return Ok(Some(outcome));
        }
        Err(e) => e,
    };

    let Some(report) = ImplausibleReport::from_error(ticker, &err) else {
        return Err(err.into());
    };
    match format {
        Format::Json => print_json(&report)?,
        Format::Text => {
            eprintln!("The market value is implausible at these assumptions.");
            eprintln!("  {}", report.error);
            eprintln!("Try a wider growth bracket (--config) or different rates.");
        }
    }
    Ok(None)
}
