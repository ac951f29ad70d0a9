//! Data types for FMP API responses.

use alphaseeker_peers::PeerFinancials;
use alphaseeker_traits::{AlphaSeekerError, Date, PriceHistory, ValuationInputs};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

fn parse_date(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Fiscal period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period (annual/quarterly).
    pub period: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: f64,
    /// Operating income.
    #[serde(default)]
    pub operating_income: f64,
    /// Net income.
    #[serde(default)]
    pub net_income: f64,
    /// EBITDA.
    #[serde(default)]
    pub ebitda: f64,
    /// Weighted average shares outstanding (diluted).
    #[serde(default)]
    pub weighted_average_shs_out_dil: f64,
}

impl IncomeStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Net margin, if revenue is positive.
    #[must_use]
    pub fn net_margin(&self) -> Option<f64> {
        (self.revenue > 0.0).then(|| self.net_income / self.revenue)
    }
}

/// Cash flow statement data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Fiscal period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period.
    pub period: String,
    /// Operating cash flow.
    #[serde(default)]
    pub operating_cash_flow: f64,
    /// Capital expenditure (negative).
    #[serde(default)]
    pub capital_expenditure: f64,
    /// Free cash flow.
    #[serde(default)]
    pub free_cash_flow: f64,
}

impl CashFlowStatement {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Key valuation metrics from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    /// Fiscal period end date.
    pub date: String,
    /// Ticker symbol.
    pub symbol: String,
    /// Reporting period.
    pub period: String,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: f64,
    /// Enterprise value.
    #[serde(default)]
    pub enterprise_value: f64,
    /// Enterprise value over EBITDA.
    #[serde(rename = "evToEBITDA", default)]
    pub ev_to_ebitda: f64,
    /// Free cash flow yield.
    #[serde(default)]
    pub free_cash_flow_yield: f64,
}

impl KeyMetrics {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Real-time quote data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Current price.
    pub price: f64,
    /// Change in price.
    #[serde(default)]
    pub change: f64,
    /// Percent change.
    #[serde(default)]
    pub change_percentage: f64,
    /// 52-week high.
    #[serde(default)]
    pub year_high: f64,
    /// 52-week low.
    #[serde(default)]
    pub year_low: f64,
    /// Market cap.
    #[serde(default)]
    pub market_cap: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

/// Company profile from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: String,
    /// Sector.
    #[serde(default)]
    pub sector: String,
    /// Industry.
    #[serde(default)]
    pub industry: String,
    /// Business description.
    #[serde(default)]
    pub description: String,
    /// Reporting currency.
    #[serde(default)]
    pub currency: String,
    /// Listing exchange.
    #[serde(default)]
    pub exchange: String,
    /// Beta against the market.
    #[serde(default)]
    pub beta: f64,
    /// Market cap.
    #[serde(default)]
    pub market_cap: f64,
}

/// A company FMP lists as a peer.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPeer {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: String,
    /// Current price.
    #[serde(default)]
    pub price: f64,
    /// Market cap.
    #[serde(default)]
    pub mkt_cap: f64,
}

/// One insider transaction filing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsiderTrade {
    /// Ticker symbol.
    pub symbol: String,
    /// Filing date.
    #[serde(default)]
    pub filing_date: String,
    /// Transaction date.
    #[serde(default)]
    pub transaction_date: String,
    /// Name of the reporting insider.
    #[serde(default)]
    pub reporting_name: String,
    /// Relationship to the company (director, officer, ...).
    #[serde(default)]
    pub type_of_owner: String,
    /// SEC transaction code description (e.g. "P-Purchase", "S-Sale").
    #[serde(default)]
    pub transaction_type: String,
    /// "A" for acquisition, "D" for disposition.
    #[serde(default)]
    pub acquisition_or_disposition: String,
    /// Shares transacted.
    #[serde(default)]
    pub securities_transacted: f64,
    /// Price per share.
    #[serde(default)]
    pub price: f64,
    /// Shares owned after the transaction.
    #[serde(default)]
    pub securities_owned: f64,
}

impl InsiderTrade {
    /// Parse the transaction date into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.transaction_date)
    }

    /// Whether the insider acquired shares.
    #[must_use]
    pub fn is_acquisition(&self) -> bool {
        self.acquisition_or_disposition.eq_ignore_ascii_case("A")
    }

    /// Approximate transaction value.
    #[must_use]
    pub fn value(&self) -> f64 {
        self.securities_transacted * self.price
    }
}

/// One institution's position in a symbol, from quarterly 13F filings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstitutionalHolder {
    /// Ticker symbol.
    pub symbol: String,
    /// Quarter-end date the position is reported for.
    #[serde(default)]
    pub date: String,
    /// SEC central index key of the filer.
    #[serde(default)]
    pub cik: String,
    /// Filer name.
    #[serde(default)]
    pub investor_name: String,
    /// Shares held at quarter end.
    #[serde(default)]
    pub shares_number: f64,
    /// Shares held at the previous quarter end.
    #[serde(default)]
    pub last_shares_number: f64,
    /// Change in shares over the quarter.
    #[serde(default)]
    pub change_in_shares_number: f64,
    /// Percent of shares outstanding held.
    #[serde(default)]
    pub ownership: f64,
    /// Market value of the position.
    #[serde(default)]
    pub market_value: f64,
}

impl InstitutionalHolder {
    /// Parse the report date into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }

    /// Whether the holder is new this quarter.
    #[must_use]
    pub fn is_new_position(&self) -> bool {
        self.last_shares_number == 0.0 && self.shares_number > 0.0
    }
}

/// Days after quarter end by which 13F holdings must be filed.
pub const THIRTEEN_F_FILING_LAG_DAYS: i64 = 45;

/// The most recent `(year, quarter)` whose 13F filings are due by `today`.
#[must_use]
pub fn latest_filed_quarter(today: NaiveDate) -> (i32, u32) {
    let cutoff = today - chrono::Duration::days(THIRTEEN_F_FILING_LAG_DAYS);
    // Quarter containing the cutoff has not ended; step back one.
    let current = (cutoff.month0() / 3) + 1;
    if current == 1 { (cutoff.year() - 1, 4) } else { (cutoff.year(), current - 1) }
}

/// Historical price data from FMP.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoricalPrice {
    /// Date.
    pub date: String,
    /// Open price.
    #[serde(default)]
    pub open: f64,
    /// High price.
    #[serde(default)]
    pub high: f64,
    /// Low price.
    #[serde(default)]
    pub low: f64,
    /// Close price.
    pub close: f64,
    /// Volume.
    #[serde(default)]
    pub volume: f64,
}

impl HistoricalPrice {
    /// Parse the date string into a NaiveDate.
    #[must_use]
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        parse_date(&self.date)
    }
}

/// Convert FMP daily prices into a [`PriceHistory`].
///
/// Rows with unparseable dates are skipped; the history is sorted oldest
/// first regardless of the response order.
///
/// # Errors
///
/// Returns a DataFrame error if the frame cannot be built.
pub fn price_history(prices: &[HistoricalPrice]) -> alphaseeker_traits::Result<PriceHistory> {
    let points: Vec<(Date, f64)> =
        prices.iter().filter_map(|p| Some((p.parsed_date()?, p.close))).collect();
    PriceHistory::from_points(&points)
}

/// Everything needed to value a company and place it among peers.
///
/// Statement vectors are most recent first, as FMP returns them.
#[derive(Debug, Clone)]
pub struct CompanyFinancials {
    /// Ticker symbol.
    pub symbol: String,
    /// Current quote.
    pub quote: Option<Quote>,
    /// Company profile.
    pub profile: Option<CompanyProfile>,
    /// Income statements (most recent first).
    pub income_statements: Vec<IncomeStatement>,
    /// Cash flow statements (most recent first).
    pub cash_flows: Vec<CashFlowStatement>,
    /// Key metrics (most recent first).
    pub key_metrics: Vec<KeyMetrics>,
}

impl CompanyFinancials {
    /// Current share price.
    #[must_use]
    pub fn price(&self) -> Option<f64> {
        self.quote.as_ref().map(|q| q.price).filter(|p| *p > 0.0)
    }

    /// Current market cap.
    #[must_use]
    pub fn market_cap(&self) -> Option<f64> {
        self.quote.as_ref().map(|q| q.market_cap).filter(|m| *m > 0.0)
    }

    /// Shares outstanding implied by market cap and price.
    #[must_use]
    pub fn shares_outstanding(&self) -> Option<f64> {
        Some(self.market_cap()? / self.price()?)
    }

    /// Most recent annual free cash flow.
    #[must_use]
    pub fn free_cash_flow(&self) -> Option<f64> {
        self.cash_flows.first().map(|cf| cf.free_cash_flow)
    }

    /// Most recent annual EBITDA.
    #[must_use]
    pub fn ebitda(&self) -> Option<f64> {
        self.income_statements.first().map(|i| i.ebitda)
    }

    /// Most recent enterprise value.
    #[must_use]
    pub fn enterprise_value(&self) -> Option<f64> {
        self.key_metrics.first().map(|m| m.enterprise_value).filter(|ev| *ev != 0.0)
    }

    /// Revenue by fiscal period end date.
    #[must_use]
    pub fn revenue_history(&self) -> Vec<(Date, f64)> {
        self.income_statements
            .iter()
            .filter_map(|i| Some((i.parsed_date()?, i.revenue)))
            .collect()
    }

    /// Revenue growth between the two most recent annual statements.
    #[must_use]
    pub fn revenue_growth(&self) -> Option<f64> {
        let [latest, prior, ..] = self.income_statements.as_slice() else {
            return None;
        };
        (prior.revenue > 0.0).then(|| latest.revenue / prior.revenue - 1.0)
    }

    /// Snapshot for a peer comparison, if every figure is available.
    #[must_use]
    pub fn to_peer_financials(&self) -> Option<PeerFinancials> {
        Some(PeerFinancials::new(
            self.symbol.clone(),
            self.revenue_growth()?,
            self.ebitda()?,
            self.enterprise_value()?,
        ))
    }

    /// Reverse DCF inputs targeting the current market cap.
    ///
    /// # Errors
    ///
    /// Returns [`AlphaSeekerError::InvalidInput`] if price, shares outstanding
    /// or free cash flow are missing, or if any of them is not positive.
    pub fn valuation_inputs(
        &self,
        discount_rate: f64,
        terminal_growth_rate: f64,
        projection_years: u32,
    ) -> alphaseeker_traits::Result<ValuationInputs> {
        let missing = |what: &str| {
            AlphaSeekerError::InvalidInput(format!("{}: {what} is not available", self.symbol))
        };
        let price = self.price().ok_or_else(|| missing("price"))?;
        let shares = self.shares_outstanding().ok_or_else(|| missing("shares outstanding"))?;
        let fcf = self.free_cash_flow().ok_or_else(|| missing("free cash flow"))?;

        ValuationInputs::from_market(
            price,
            shares,
            fcf,
            discount_rate,
            terminal_growth_rate,
            projection_years,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn income(date: &str, revenue: f64, ebitda: f64) -> IncomeStatement {
        IncomeStatement {
            date: date.to_string(),
            symbol: "TEST".to_string(),
            period: "FY".to_string(),
            revenue,
            operating_income: 0.0,
            net_income: revenue * 0.1,
            ebitda,
            weighted_average_shs_out_dil: 0.0,
        }
    }

    fn financials() -> CompanyFinancials {
        CompanyFinancials {
            symbol: "TEST".to_string(),
            quote: Some(Quote {
                symbol: "TEST".to_string(),
                name: "Test Corp".to_string(),
                price: 50.0,
                change: 0.0,
                change_percentage: 0.0,
                year_high: 60.0,
                year_low: 40.0,
                market_cap: 5_000.0,
                volume: 0.0,
            }),
            profile: None,
            income_statements: vec![
                income("2024-12-31", 1_100.0, 300.0),
                income("2023-12-31", 1_000.0, 250.0),
            ],
            cash_flows: vec![CashFlowStatement {
                date: "2024-12-31".to_string(),
                symbol: "TEST".to_string(),
                period: "FY".to_string(),
                operating_cash_flow: 400.0,
                capital_expenditure: -150.0,
                free_cash_flow: 250.0,
            }],
            key_metrics: vec![KeyMetrics {
                date: "2024-12-31".to_string(),
                symbol: "TEST".to_string(),
                period: "FY".to_string(),
                market_cap: 5_000.0,
                enterprise_value: 6_000.0,
                ev_to_ebitda: 20.0,
                free_cash_flow_yield: 0.05,
            }],
        }
    }

    #[test]
    fn test_derived_figures() {
        let f = financials();
        assert_relative_eq!(f.shares_outstanding().unwrap(), 100.0);
        assert_relative_eq!(f.revenue_growth().unwrap(), 0.1, epsilon = 1e-12);
        assert_eq!(f.revenue_history().len(), 2);

        let peer = f.to_peer_financials().unwrap();
        assert_relative_eq!(peer.ev_to_ebitda().unwrap(), 20.0);
    }

    #[test]
    fn test_valuation_inputs_target_market_cap() {
        let inputs = financials().valuation_inputs(0.10, 0.03, 10).unwrap();
        assert_relative_eq!(inputs.target_value.unwrap(), 5_000.0);
        assert_relative_eq!(inputs.base_cash_flow, 250.0);
        assert_eq!(inputs.projection_years, 10);
    }

    #[test]
    fn test_missing_quote() {
        let mut f = financials();
        f.quote = None;
        assert!(f.shares_outstanding().is_none());
        assert!(matches!(
            f.valuation_inputs(0.10, 0.03, 10),
            Err(AlphaSeekerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_single_statement_has_no_growth() {
        let mut f = financials();
        f.income_statements.truncate(1);
        assert!(f.revenue_growth().is_none());
        assert!(f.to_peer_financials().is_none());
    }

    #[test]
    fn test_deserialize_stable_payloads() {
        let quote: Quote = serde_json::from_str(
            r#"{"symbol":"AAPL","name":"Apple Inc.","price":232.8,
                "changePercentage":1.2,"marketCap":3500000000000}"#,
        )
        .unwrap();
        assert_relative_eq!(quote.market_cap, 3.5e12);

        let metrics: KeyMetrics = serde_json::from_str(
            r#"{"date":"2024-09-28","symbol":"AAPL","period":"FY",
                "enterpriseValue":3.4e12,"evToEBITDA":25.1}"#,
        )
        .unwrap();
        assert_relative_eq!(metrics.ev_to_ebitda, 25.1);

        let trade: InsiderTrade = serde_json::from_str(
            r#"{"symbol":"AAPL","transactionDate":"2024-11-01","reportingName":"Doe Jane",
                "acquisitionOrDisposition":"D","securitiesTransacted":1000,"price":220.0}"#,
        )
        .unwrap();
        assert!(!trade.is_acquisition());
        assert_relative_eq!(trade.value(), 220_000.0);
    }

    #[test]
    fn test_deserialize_institutional_holder() {
        let holders: Vec<InstitutionalHolder> = serde_json::from_str(
            r#"[{"date":"2024-09-30","cik":"0000102909","investorName":"VANGUARD GROUP INC",
                "symbol":"AAPL","sharesNumber":1300000000,"lastSharesNumber":1280000000,
                "changeInSharesNumber":20000000,"ownership":8.6,"marketValue":3.0e11},
               {"symbol":"AAPL","investorName":"NEW FUND LP","sharesNumber":5000}]"#,
        )
        .unwrap();

        assert_eq!(holders.len(), 2);
        assert_eq!(holders[0].investor_name, "VANGUARD GROUP INC");
        assert_relative_eq!(holders[0].change_in_shares_number, 2.0e7);
        assert_eq!(holders[0].parsed_date(), NaiveDate::from_ymd_opt(2024, 9, 30));
        assert!(!holders[0].is_new_position());
        assert!(holders[1].is_new_position());
    }

    #[test]
    fn test_latest_filed_quarter() {
        let day = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap();
        assert_eq!(latest_filed_quarter(day(2025, 5, 20)), (2025, 1));
        assert_eq!(latest_filed_quarter(day(2025, 5, 10)), (2024, 4));
        assert_eq!(latest_filed_quarter(day(2025, 2, 14)), (2024, 4));
        assert_eq!(latest_filed_quarter(day(2025, 2, 10)), (2024, 3));
        assert_eq!(latest_filed_quarter(day(2025, 12, 31)), (2025, 3));
    }

    fn close(date: &str, close: f64) -> HistoricalPrice {
        HistoricalPrice {
            date: date.into(),
            open: 0.0,
            high: 0.0,
            low: 0.0,
            close,
            volume: 0.0,
        }
    }

    #[test]
    fn test_price_history_sorted() {
        let prices = vec![
            close("2024-01-03", 12.0),
            close("bad", 99.0),
            close("2024-01-02", 11.0),
        ];
        let history = price_history(&prices).unwrap();
        assert_eq!(history.closes().unwrap(), vec![11.0, 12.0]);
    }
}
