//! Offline reverse DCF command.

use super::{AssumptionArgs, solve_or_report};
use crate::{
    brief::ValuationBrief,
    output::{Format, banner, money, pct, print_json, section},
};
use alphaseeker_dcf::SolverConfig;
use alphaseeker_traits::ValuationInputs;
use anyhow::{Result, bail};
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct DcfArgs {
    /// Latest annual free cash flow
    #[arg(long)]
    base_cash_flow: f64,

    /// Market value to match (e.g. market cap)
    #[arg(long, conflicts_with_all = ["price", "shares"])]
    target: Option<f64>,

    /// Share price; with --shares, sets the target to price x shares
    #[arg(long, requires = "shares")]
    price: Option<f64>,

    /// Shares outstanding
    #[arg(long, requires = "price")]
    shares: Option<f64>,

    /// Label for the output
    #[arg(long, default_value = "custom")]
    label: String,

    #[command(flatten)]
    assumptions: AssumptionArgs,
}

impl DcfArgs {
    fn inputs(&self) -> Result<ValuationInputs> {
        let AssumptionArgs { discount_rate, terminal_growth, years } = self.assumptions;
        let inputs = match (self.target, self.price, self.shares) {
            (Some(target), _, _) => {
                ValuationInputs::new(self.base_cash_flow, discount_rate, terminal_growth, years)
                    .with_target_value(target)
            }
            (None, Some(price), Some(shares)) => ValuationInputs::from_market(
                price,
                shares,
                self.base_cash_flow,
                discount_rate,
                terminal_growth,
                years,
            )?,
            _ => bail!("give either --target or both --price and --shares"),
        };
        Ok(inputs)
    }
}

/// Solve for the growth rate that justifies the given market value.
pub(crate) fn run(args: &DcfArgs, config: &SolverConfig, format: Format) -> Result<()> {
    let inputs = args.inputs()?;

    if format == Format::Text {
        banner("Reverse DCF");
        println!("Base cash flow:   {}", money(inputs.base_cash_flow));
        println!("Target value:     {}", money(inputs.target_value.unwrap_or_default()));
        println!("Discount rate:    {}", pct(Some(inputs.discount_rate)));
        println!("Terminal growth:  {}", pct(Some(inputs.terminal_growth_rate)));
        println!("Horizon:          {} years\n", inputs.projection_years);
    }

    let Some(outcome) = solve_or_report(&args.label, &inputs, config, format)? else {
        return Ok(());
    };
    let brief = ValuationBrief::new(args.label.clone(), inputs, outcome, None)?;

    match format {
        Format::Json => print_json(&brief),
        Format::Text => {
            print_outcome(&brief);
            Ok(())
        }
    }
}

/// Text rendering of a solved brief, shared with the `value` command.
pub(crate) fn print_outcome(brief: &ValuationBrief) {
    let outcome = &brief.outcome;
    section("IMPLIED GROWTH");
    println!("Implied growth:   {}", pct(Some(outcome.implied_growth_rate)));
    println!(
        "Converged:        {} ({} iterations, residual {:.4})",
        if outcome.converged { "yes" } else { "no" },
        outcome.iterations,
        outcome.residual
    );
    println!("PV explicit:      {}", money(brief.valuation.present_value_of_explicit_flows));
    println!("PV terminal:      {}", money(brief.valuation.present_value_of_terminal));
    println!("Terminal share:   {}\n", pct(brief.valuation.terminal_share()));

    println!("{:<6} {:>16}", "Year", "Free cash flow");
    println!("{}", "─".repeat(23));
    for flow in &brief.projected_cash_flows {
        println!("{:<6} {:>16}", flow.year, money(flow.amount));
    }
    println!();
}
