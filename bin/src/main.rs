//! AlphaSeeker CLI binary.
//!
//! Command-line interface for reverse DCF valuation and peer comparison.

mod brief;
mod cmd;
mod data;
mod output;

use alphaseeker_dcf::SolverConfig;
use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use output::Format;
use std::{path::Path, path::PathBuf, process};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "alphaseeker")]
#[command(about = "Reverse DCF valuation and peer comparison", long_about = None)]
#[command(version)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Log at debug level
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines on stderr
    #[arg(long, global = true)]
    log_json: bool,

    /// Solver configuration file (JSON)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Output format
    #[arg(long, global = true, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Subcommand)]
enum Commands {
    /// Reverse DCF from explicit numbers
    Dcf(cmd::dcf::DcfArgs),

    /// Fetch a company and solve for the growth its price implies
    Value(cmd::value::ValueArgs),

    /// Rank a company against its peers
    Peers(cmd::peers::PeersArgs),

    /// Implied growth across discount and terminal growth rates
    Sweep(cmd::sweep::SweepArgs),

    /// Moving averages and RSI over the last year
    Technicals(cmd::technicals::TechnicalsArgs),

    /// Insider transactions and institutional holders
    #[command(alias = "insiders")]
    Ownership(cmd::ownership::OwnershipArgs),
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.global.verbose, cli.global.log_json);

    let solver_config = load_solver_config(cli.global.config.as_deref())?;
    let format = cli.global.format;

    match cli.command {
        Commands::Dcf(args) => cmd::dcf::run(&args, &solver_config, format)?,
        Commands::Value(args) => cmd::value::run(&args, &solver_config, format).await?,
        Commands::Peers(args) => cmd::peers::run(&args, format).await?,
        Commands::Sweep(args) => cmd::sweep::run(&args, &solver_config, format)?,
        Commands::Technicals(args) => cmd::technicals::run(&args, format).await?,
        Commands::Ownership(args) => cmd::ownership::run(&args, format).await?,
    }

    Ok(())
}

/// Install the global subscriber. `RUST_LOG` takes precedence over `--verbose`.
///
/// The `alphaseeker` directive is a target prefix, so it also covers the
/// library crates.
fn init_tracing(verbose: bool, json: bool) {
    let level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("warn,alphaseeker={level}")));

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
            .try_init()
    };

    if let Err(e) = result {
        eprintln!("Warning: logging already initialised: {e}");
    }
}

fn load_solver_config(path: Option<&Path>) -> Result<SolverConfig> {
    let Some(path) = path else {
        return Ok(SolverConfig::default());
    };

    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading solver config {}", path.display()))?;
    let config: SolverConfig = serde_json::from_str(&text)
        .with_context(|| format!("parsing solver config {}", path.display()))?;
    config.validate()?;

    tracing::debug!(?config, "loaded solver config");
    Ok(config)
}
