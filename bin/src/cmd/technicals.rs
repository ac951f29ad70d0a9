//! Moving averages and RSI over the trailing year.

use crate::{
    data,
    output::{Format, banner, print_json},
};
use alphaseeker_signals::{TechnicalConfig, TechnicalSnapshot};
use anyhow::Result;
use clap::Args;

#[derive(Debug, Args)]
pub(crate) struct TechnicalsArgs {
    /// Ticker symbol
    ticker: String,

    /// Short moving average window (days)
    #[arg(long, default_value_t = 50)]
    short_window: usize,

    /// Long moving average window (days)
    #[arg(long, default_value_t = 200)]
    long_window: usize,

    /// RSI lookback (days)
    #[arg(long, default_value_t = 14)]
    rsi_period: usize,
}

impl TechnicalsArgs {
    fn config(&self) -> Result<TechnicalConfig> {
        let config = TechnicalConfig {
            sma_short_window: self.short_window,
            sma_long_window: self.long_window,
            rsi_period: self.rsi_period,
            ..TechnicalConfig::default()
        };
        config.validate()?;
        Ok(config)
    }
}

pub(crate) async fn run(args: &TechnicalsArgs, format: Format) -> Result<()> {
    let ticker = args.ticker.to_uppercase();
    let config = args.config()?;
    let client = data::client()?;
    let history = data::load_year_of_prices(&client, &ticker).await?;
    let snapshot = TechnicalSnapshot::from_history(&history, &config)?;

    if format == Format::Json {
        return print_json(&snapshot);
    }

    let fmt = |v: Option<f64>| v.map_or_else(|| "N/A".to_string(), |v| format!("{v:.2}"));

    banner(&format!("Technicals: {ticker}"));
    if let Some(date) = snapshot.as_of {
        println!("As of:        {date}");
    }
    println!("Last close:   {:.2}", snapshot.last_close);
    println!("SMA {:<4}      {}", config.sma_short_window, fmt(snapshot.sma_short));
    println!("SMA {:<4}      {}", config.sma_long_window, fmt(snapshot.sma_long));
    println!("Trend:        {:?}", snapshot.trend);
    match snapshot.rsi_zone {
        Some(zone) => {
            println!("RSI {:<4}      {} ({zone:?})", config.rsi_period, fmt(snapshot.rsi));
        }
        None => println!("RSI {:<4}      N/A", config.rsi_period),
    }
    println!();
    Ok(())
}
