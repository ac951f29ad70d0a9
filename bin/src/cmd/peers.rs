//! Peer ranking by growth per unit of EV/EBITDA.

use crate::{
    data,
    output::{Format, banner, pct, print_json, section},
};
use alphaseeker_peers::{PeerComparison, compare};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct PeersArgs {
    /// Ticker symbol of the subject company
    ticker: String,

    /// Peer tickers, comma separated; defaults to the provider's peer list
    #[arg(long, value_delimiter = ',')]
    peers: Vec<String>,

    /// Peers to take from the provider's list
    #[arg(long, default_value_t = 5)]
    max_peers: usize,
}

/// Rank the subject's peers and report whether any is a better deal.
pub(crate) async fn run(args: &PeersArgs, format: Format) -> Result<()> {
    let ticker = args.ticker.to_uppercase();
    let client = data::client()?;
    let (subject, peers) =
        data::load_peer_set(&client, &ticker, &args.peers, args.max_peers).await?;

    let comparison = compare(&subject, &peers);

    match format {
        Format::Json => print_json(&comparison)?,
        Format::Text => {
            banner(&format!("Peer comparison: {ticker}"));
            print_comparison(&comparison);
        }
    }
    Ok(())
}

/// Ranked table, better alternative, and exclusions.
pub(crate) fn print_comparison(comparison: &PeerComparison) {
    section("PEER COMPARISON");

    println!("{:<4} {:<8} {:>10} {:>12} {:>10}", "#", "Ticker", "EV/EBITDA", "Rev growth", "Score");
    println!("{}", "─".repeat(48));
    if let Some(subject) = &comparison.subject {
        println!(
            "{:<4} {:<8} {:>10.2} {:>12} {:>10.4}",
            "*",
            subject.ticker,
            subject.ev_to_ebitda,
            pct(Some(subject.revenue_growth)),
            subject.relative_score
        );
    }
    for (rank, row) in comparison.rows.iter().enumerate() {
        println!(
            "{:<4} {:<8} {:>10.2} {:>12} {:>10.4}",
            rank + 1,
            row.ticker,
            row.ev_to_ebitda,
            pct(Some(row.revenue_growth)),
            row.relative_score
        );
    }
    println!();

    match comparison.better_alternative() {
        Some(best) => println!(
            "Better alternative: {} (score {:.4}, {} growth at {:.1}x EV/EBITDA)",
            best.ticker,
            best.relative_score,
            pct(Some(best.revenue_growth)),
            best.ev_to_ebitda
        ),
        None => println!("No peer offers more growth per unit of multiple."),
    }

    if !comparison.excluded.is_empty() {
        println!("\nExcluded:");
        for excluded in &comparison.excluded {
            println!("  {:<8} {}", excluded.ticker, excluded.reason);
        }
    }
    println!();
}
