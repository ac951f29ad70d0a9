#![doc = include_str!("../README.md")]
#![forbid(unsafe_code)]

pub mod aggregate;
pub mod cache;
pub mod config;
pub mod projection;
pub mod solver;
pub mod sweep;
pub mod terminal;
pub mod verdict;

pub use aggregate::{DcfModel, aggregate};
pub use cache::SolveCache;
pub use config::{
    DEFAULT_LOWER_BOUND, DEFAULT_MAX_ITERATIONS, DEFAULT_RELATIVE_TOLERANCE, DEFAULT_UPPER_BOUND,
    SolverConfig, Tolerance,
};
pub use projection::{ProjectedCashFlow, ProjectedCashFlows, project};
pub use solver::{ImpliedGrowthSolver, SolverOutcome, solve};
pub use sweep::{SensitivityGrid, sensitivity_grid};
pub use terminal::terminal_value;
pub use verdict::GrowthVerdict;
