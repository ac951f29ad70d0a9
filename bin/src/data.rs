//! Data loading utilities for the AlphaSeeker CLI.

use alphaseeker_fmp::{CompanyFinancials, FmpClient};
use alphaseeker_peers::PeerFinancials;
use alphaseeker_traits::PriceHistory;
use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, Utc};
use tracing::{info, warn};

/// Annual statements fetched per company. Five years matches the horizon of
/// the historical growth figure.
pub(crate) const STATEMENT_YEARS: u32 = 5;

/// Create the FMP client from the environment.
pub(crate) fn client() -> Result<FmpClient> {
    FmpClient::from_env().context("set FMP_API_KEY in the environment or a .env file")
}

/// Fetch everything needed to value one company.
pub(crate) async fn load_company(client: &FmpClient, ticker: &str) -> Result<CompanyFinancials> {
    info!(ticker, "fetching company financials");
    client
        .company_financials(ticker, STATEMENT_YEARS)
        .await
        .with_context(|| format!("fetching {ticker}"))
}

/// Fetch the subject and its peers as comparison snapshots.
pub(crate) async fn load_peer_set(
    client: &FmpClient,
    ticker: &str,
    explicit: &[String],
    max_peers: usize,
) -> Result<(PeerFinancials, Vec<PeerFinancials>)> {
    let subject = load_company(client, ticker).await?;
    let subject = subject
        .to_peer_financials()
        .with_context(|| format!("{ticker} is missing revenue, EBITDA or enterprise value"))?;
    let peers = load_peers(client, ticker, explicit, max_peers).await?;
    Ok((subject, peers))
}

/// Fetch the peers of `ticker` as comparison snapshots.
///
/// Peers come from `explicit` when given, otherwise from the provider's
/// peer list (capped at `max_peers`). Peers missing a figure are skipped
/// with a warning.
pub(crate) async fn load_peers(
    client: &FmpClient,
    ticker: &str,
    explicit: &[String],
    max_peers: usize,
) -> Result<Vec<PeerFinancials>> {
    let tickers: Vec<String> = if explicit.is_empty() {
        client
            .stock_peers(ticker)
            .await
            .with_context(|| format!("discovering peers of {ticker}"))?
            .into_iter()
            .take(max_peers)
            .map(|p| p.symbol)
            .collect()
    } else {
        explicit.iter().map(|t| t.trim().to_uppercase()).collect()
    };
    info!(ticker, peers = tickers.len(), "fetching peer financials");

    let refs: Vec<&str> = tickers.iter().map(String::as_str).collect();
    let peers = client
        .bulk_company_financials(&refs, STATEMENT_YEARS)
        .await
        .into_iter()
        .filter_map(|company| {
            let snapshot = company.to_peer_financials();
            if snapshot.is_none() {
                warn!(ticker = %company.symbol, "peer is missing figures, skipped");
            }
            snapshot
        })
        .collect();

    Ok(peers)
}

/// Fetch one year of daily closes ending today.
pub(crate) async fn load_year_of_prices(client: &FmpClient, ticker: &str) -> Result<PriceHistory> {
    let (from, to) = trailing_year(Utc::now().date_naive());
    client
        .price_history(ticker, Some(from), Some(to))
        .await
        .with_context(|| format!("fetching price history for {ticker}"))
}

fn trailing_year(today: NaiveDate) -> (NaiveDate, NaiveDate) {
    (today - Duration::days(365), today)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_year() {
        let today = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let (from, to) = trailing_year(today);
        assert_eq!(from, NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(to, today);
    }
}
