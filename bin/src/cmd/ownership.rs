//! Insider transactions and institutional holders.

use crate::{
    data,
    output::{Format, banner, money, print_json, section},
};
use alphaseeker_fmp::{InsiderTrade, InstitutionalHolder, latest_filed_quarter};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Args;
use serde::Serialize;
use tracing::warn;

#[derive(Debug, Args)]
pub(crate) struct OwnershipArgs {
    /// Ticker symbol
    ticker: String,

    /// Rows to show in each table
    #[arg(long, default_value_t = 10)]
    limit: u32,
}

/// Both ownership tables, as handed to a narrative writer.
#[derive(Debug, Serialize)]
struct OwnershipReport {
    ticker: String,
    /// 13F year and quarter the holder table is drawn from.
    holders_year: i32,
    holders_quarter: u32,
    insider_trades: Vec<InsiderTrade>,
    institutional_holders: Vec<InstitutionalHolder>,
    net_insider_flow: f64,
}

/// Buys minus sells, in currency.
fn net_insider_flow(trades: &[InsiderTrade]) -> f64 {
    trades
        .iter()
        .map(|t| if t.is_acquisition() { t.value() } else { -t.value() })
        .sum()
}

pub(crate) async fn run(args: &OwnershipArgs, format: Format) -> Result<()> {
    let ticker = args.ticker.to_uppercase();
    let client = data::client()?;
    let (year, quarter) = latest_filed_quarter(Utc::now().date_naive());

    let (trades, holders) = tokio::join!(
        client.insider_trades(&ticker, args.limit),
        client.institutional_holders(&ticker, year, quarter, args.limit),
    );
    let trades = trades.with_context(|| format!("fetching insider trades for {ticker}"))?;
    let holders = holders.unwrap_or_else(|error| {
        warn!(ticker, %error, "institutional holders unavailable");
        Vec::new()
    });

    let report = OwnershipReport {
        net_insider_flow: net_insider_flow(&trades),
        ticker,
        holders_year: year,
        holders_quarter: quarter,
        insider_trades: trades,
        institutional_holders: holders,
    };

    match format {
        Format::Json => print_json(&report),
        Format::Text => {
            print_report(&report);
            Ok(())
        }
    }
}

fn print_report(report: &OwnershipReport) {
    banner(&format!("Ownership: {}", report.ticker));

    section("INSIDER TRADING");
    if report.insider_trades.is_empty() {
        println!("No recent insider transactions.\n");
    } else {
        println!(
            "{:<12} {:<28} {:<5} {:>12} {:>10} {:>12}",
            "Date", "Insider", "Side", "Shares", "Price", "Value"
        );
        println!("{}", "─".repeat(84));
        for trade in &report.insider_trades {
            let name: String = trade.reporting_name.chars().take(28).collect();
            println!(
                "{:<12} {:<28} {:<5} {:>12.0} {:>10.2} {:>12}",
                trade.transaction_date,
                name,
                if trade.is_acquisition() { "BUY" } else { "SELL" },
                trade.securities_transacted,
                trade.price,
                money(trade.value())
            );
        }
        println!("\nNet insider flow: {}\n", money(report.net_insider_flow));
    }

    section(&format!(
        "INSTITUTIONAL HOLDERS ({} Q{})",
        report.holders_year, report.holders_quarter
    ));
    if report.institutional_holders.is_empty() {
        println!("No institutional holder data available.\n");
        return;
    }
    println!(
        "{:<32} {:>14} {:>12} {:>9} {:>12}",
        "Holder", "Shares", "Change", "Own %", "Value"
    );
    println!("{}", "─".repeat(83));
    for holder in &report.institutional_holders {
        let name: String = holder.investor_name.chars().take(32).collect();
        let change = if holder.is_new_position() {
            "new".to_string()
        } else {
            format!("{:+.0}", holder.change_in_shares_number)
        };
        println!(
            "{:<32} {:>14.0} {:>12} {:>8.2}% {:>12}",
            name,
            holder.shares_number,
            change,
            holder.ownership,
            money(holder.market_value)
        );
    }
    println!();
}
