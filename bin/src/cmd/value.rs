//! Live reverse DCF for one listed company.

use super::{
    AssumptionArgs, dcf::print_outcome, peers::print_comparison, solve_or_report,
};
use crate::{
    brief::ValuationBrief,
    data,
    output::{Format, banner, money, pct, print_json, section},
};
use alphaseeker_dcf::SolverConfig;
use alphaseeker_peers::compare;
use alphaseeker_signals::{latest_growth, revenue_cagr};
use anyhow::{Context, Result};
use clap::Args;
use tracing::info;

#[derive(Debug, Args)]
pub(crate) struct ValueArgs {
    /// Ticker symbol (e.g. AAPL)
    ticker: String,

    #[command(flatten)]
    assumptions: AssumptionArgs,

    /// Also rank the company against its peers
    #[arg(long)]
    with_peers: bool,

    /// Peer tickers, comma separated; defaults to the provider's peer list
    #[arg(long, value_delimiter = ',', requires = "with_peers")]
    peers: Vec<String>,

    /// Peers to take from the provider's list
    #[arg(long, default_value_t = 5)]
    max_peers: usize,
}

/// Fetch the company, solve for implied growth, and compare it with the
/// revenue growth the company has delivered.
pub(crate) async fn run(args: &ValueArgs, config: &SolverConfig, format: Format) -> Result<()> {
    let ticker = args.ticker.to_uppercase();
    let client = data::client()?;
    let company = data::load_company(&client, &ticker).await?;

    let AssumptionArgs { discount_rate, terminal_growth, years } = args.assumptions;
    let inputs = company
        .valuation_inputs(discount_rate, terminal_growth, years)
        .with_context(|| format!("building valuation inputs for {ticker}"))?;
    let revenues = company.revenue_history();
    let historical_growth = revenue_cagr(&revenues);
    let company_name = company.profile.as_ref().map(|p| p.company_name.clone());

    if format == Format::Text {
        banner(&format!("Reverse DCF: {ticker}"));
        if let Some(name) = &company_name {
            println!("Company:          {name}");
        }
        if let Some(price) = company.price() {
            println!("Price:            {price:.2}");
        }
        println!("Market cap:       {}", money(inputs.target_value.unwrap_or_default()));
        println!("Free cash flow:   {}", money(inputs.base_cash_flow));
        println!("Discount rate:    {}", pct(Some(discount_rate)));
        println!("Terminal growth:  {}\n", pct(Some(terminal_growth)));
    }

    let Some(outcome) = solve_or_report(&ticker, &inputs, config, format)? else {
        return Ok(());
    };
    info!(ticker, implied = outcome.implied_growth_rate, "solved implied growth");

    let mut brief = ValuationBrief::new(ticker.clone(), inputs, outcome, historical_growth)?
        .with_company_name(company_name)
        .with_latest_growth(latest_growth(&revenues));

    if args.with_peers {
        let subject = company
            .to_peer_financials()
            .with_context(|| format!("{ticker} is missing revenue, EBITDA or enterprise value"))?;
        let peers = data::load_peers(&client, &ticker, &args.peers, args.max_peers).await?;
        brief = brief.with_peers(compare(&subject, &peers));
    }

    match format {
        Format::Json => print_json(&brief)?,
        Format::Text => {
            print_outcome(&brief);
            print_verdict(&brief);
            if let Some(comparison) = &brief.peers {
                print_comparison(comparison);
            }
        }
    }

    Ok(())
}

fn print_verdict(brief: &ValuationBrief) {
    section("MARKET EXPECTATIONS VS HISTORY");
    println!("Implied growth:     {}", pct(Some(brief.outcome.implied_growth_rate)));
    println!("Historical growth:  {} (revenue CAGR)", pct(brief.historical_growth));
    if brief.latest_growth.is_some() {
        println!("Last year:          {} (revenue YoY)", pct(brief.latest_growth));
    }
    match brief.verdict {
        Some(verdict) => {
            println!("Verdict:            {}", verdict.to_string().to_uppercase());
            println!("                    {}", verdict.description());
        }
        None => println!("Verdict:            not enough revenue history"),
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[derive(Parser)]
    struct Harness {
        #[command(flatten)]
        args: ValueArgs,
    }

    #[test]
    fn test_defaults() {
        let args = Harness::try_parse_from(["value", "aapl"]).unwrap().args;
        assert_eq!(args.ticker, "aapl");
        assert!((args.assumptions.discount_rate - 0.10).abs() < f64::EPSILON);
        assert!((args.assumptions.terminal_growth - 0.03).abs() < f64::EPSILON);
        assert_eq!(args.assumptions.years, 10);
        assert!(!args.with_peers);
    }

    #[test]
    fn test_peer_list_needs_flag() {
        assert!(Harness::try_parse_from(["value", "AAPL", "--peers", "MSFT"]).is_err());

        let args =
            Harness::try_parse_from(["value", "AAPL", "--with-peers", "--peers", "MSFT,GOOG"])
                .unwrap()
                .args;
        assert_eq!(args.peers, vec!["MSFT", "GOOG"]);
    }
}
