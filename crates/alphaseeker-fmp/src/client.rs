//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{
        self,
        CashFlowStatement, CompanyFinancials, CompanyProfile, HistoricalPrice, IncomeStatement,
        InsiderTrade, InstitutionalHolder, KeyMetrics, Period, Quote, StockPeer,
    },
};
use alphaseeker_traits::PriceHistory;
use chrono::NaiveDate;
use reqwest::Client;
use std::{env, time::Duration};
use tracing::{debug, warn};

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Pause before the single retry of a transient failure in bulk fetches.
const RETRY_DELAY: Duration = Duration::from_secs(2);

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine; the variable may already be set.
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;
        let path = endpoint.split('?').next().unwrap_or(endpoint);
        debug!(path, bytes = text.len(), "FMP response");

        // Check for error responses
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        serde_json::from_str(&text).map_err(|e| {
            FmpError::Json(serde_json::Error::io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!("Failed to parse: {e}. Response: {text}"),
            )))
        })
    }

    /// Get income statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return (most recent first)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        let endpoint = format!(
            "income-statement?symbol={}&period={}{}",
            symbol.to_uppercase(),
            period.as_str(),
            limit_param
        );
        self.get(&endpoint).await
    }

    /// Get cash flow statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn cash_flow(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<CashFlowStatement>> {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        let endpoint = format!(
            "cash-flow-statement?symbol={}&period={}{}",
            symbol.to_uppercase(),
            period.as_str(),
            limit_param
        );
        self.get(&endpoint).await
    }

    /// Get key metrics for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn key_metrics(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<KeyMetrics>> {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        let endpoint = format!(
            "key-metrics?symbol={}&period={}{}",
            symbol.to_uppercase(),
            period.as_str(),
            limit_param
        );
        self.get(&endpoint).await
    }

    /// Get real-time quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let endpoint = format!("quote?symbol={}", symbol.to_uppercase());
        let quotes: Vec<Quote> = self.get(&endpoint).await?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get historical daily prices for a symbol, most recent first.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `from` - First date to include
    /// * `to` - Last date to include
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn historical_prices(
        &self,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<Vec<HistoricalPrice>> {
        let mut endpoint = format!("historical-price-eod/full?symbol={}", symbol.to_uppercase());
        if let Some(from) = from {
            endpoint.push_str(&format!("&from={}", from.format("%Y-%m-%d")));
        }
        if let Some(to) = to {
            endpoint.push_str(&format!("&to={}", to.format("%Y-%m-%d")));
        }
        // The stable API returns a flat array, not a wrapped response
        self.get(&endpoint).await
    }

    /// Get daily closes for a symbol as a [`PriceHistory`], oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails, no prices come back, or the
    /// history cannot be built.
    pub async fn price_history(
        &self,
        symbol: &str,
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<PriceHistory> {
        let prices = self.historical_prices(symbol, from, to).await?;
        if prices.is_empty() {
            return Err(FmpError::NoData(symbol.to_uppercase()));
        }
        Ok(types::price_history(&prices)?)
    }

    /// Get the company profile for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the symbol is unknown.
    pub async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let endpoint = format!("profile?symbol={}", symbol.to_uppercase());
        let profiles: Vec<CompanyProfile> = self.get(&endpoint).await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get the companies FMP lists as peers of a symbol.
    ///
    /// The symbol itself is never included.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn stock_peers(&self, symbol: &str) -> Result<Vec<StockPeer>> {
        let symbol = symbol.to_uppercase();
        let endpoint = format!("stock-peers?symbol={symbol}");
        let peers: Vec<StockPeer> = self.get(&endpoint).await?;
        Ok(peers.into_iter().filter(|p| p.symbol != symbol).collect())
    }

    /// Get recent insider transactions for a symbol, most recent first.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn insider_trades(&self, symbol: &str, limit: u32) -> Result<Vec<InsiderTrade>> {
        let endpoint = format!(
            "insider-trading/search?symbol={}&page=0&limit={limit}",
            symbol.to_uppercase()
        );
        self.get(&endpoint).await
    }

    /// Get the largest institutional positions in a symbol for one 13F quarter.
    ///
    /// Use [`latest_filed_quarter`](crate::latest_filed_quarter) for the most
    /// recent quarter with complete filings.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn institutional_holders(
        &self,
        symbol: &str,
        year: i32,
        quarter: u32,
        limit: u32,
    ) -> Result<Vec<InstitutionalHolder>> {
        let endpoint = holders_endpoint(symbol, year, quarter, limit);
        let mut holders: Vec<InstitutionalHolder> = self.get(&endpoint).await?;
        holders.sort_by(|a, b| b.shares_number.total_cmp(&a.shares_number));
        holders.truncate(limit as usize);
        Ok(holders)
    }

    /// Get everything needed to value a symbol.
    ///
    /// Fetches the quote, profile, income statements, cash flows and key
    /// metrics concurrently. Only the quote is required; the other parts are
    /// left empty when their request fails.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol
    /// * `periods` - Number of annual periods to fetch
    ///
    /// # Errors
    ///
    /// Returns the quote error if the quote cannot be fetched.
    pub async fn company_financials(
        &self,
        symbol: &str,
        periods: u32,
    ) -> Result<CompanyFinancials> {
        let (quote, profile, income, cash, metrics) = tokio::join!(
            self.quote(symbol),
            self.profile(symbol),
            self.income_statement(symbol, Period::Annual, Some(periods)),
            self.cash_flow(symbol, Period::Annual, Some(periods)),
            self.key_metrics(symbol, Period::Annual, Some(periods)),
        );

        let quote = quote?;
        for (part, error) in [
            ("profile", profile.as_ref().err()),
            ("income statement", income.as_ref().err()),
            ("cash flow", cash.as_ref().err()),
            ("key metrics", metrics.as_ref().err()),
        ] {
            if let Some(error) = error {
                debug!(symbol, part, %error, "partial company data");
            }
        }

        Ok(CompanyFinancials {
            symbol: symbol.to_uppercase(),
            quote: Some(quote),
            profile: profile.ok(),
            income_statements: income.unwrap_or_default(),
            cash_flows: cash.unwrap_or_default(),
            key_metrics: metrics.unwrap_or_default(),
        })
    }

    /// Get company financials for several symbols.
    ///
    /// A transient failure (rate limit, network) is retried once after a short
    /// pause. Symbols that still fail are logged and skipped, so the result
    /// may be shorter than the input.
    pub async fn bulk_company_financials(
        &self,
        symbols: &[&str],
        periods: u32,
    ) -> Vec<CompanyFinancials> {
        let mut results = Vec::with_capacity(symbols.len());

        for symbol in symbols {
            let mut outcome = self.company_financials(symbol, periods).await;
            if let Err(error) = &outcome
                && error.is_transient()
            {
                debug!(symbol, %error, "transient failure, retrying");
                tokio::time::sleep(RETRY_DELAY).await;
                outcome = self.company_financials(symbol, periods).await;
            }

            match outcome {
                Ok(data) => results.push(data),
                Err(error) => warn!(symbol, %error, "failed to fetch company data"),
            }
        }

        results
    }
}

fn holders_endpoint(symbol: &str, year: i32, quarter: u32, limit: u32) -> String {
    format!(
        "institutional-ownership/extract-analytics/holder?symbol={}&year={year}\
         &quarter={quarter}&page=0&limit={limit}",
        symbol.to_uppercase()
    )
}
