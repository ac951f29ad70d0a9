//! Structured valuation summary for downstream explanation.

use alphaseeker_dcf::{GrowthVerdict, ProjectedCashFlows, SolverOutcome, aggregate, project};
use alphaseeker_peers::PeerComparison;
use alphaseeker_traits::{Ticker, ValuationInputs, ValuationResult};
use anyhow::Result;
use serde::Serialize;

/// Everything a narrative writer needs to explain one valuation.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ValuationBrief {
    pub(crate) ticker: Ticker,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) company_name: Option<String>,
    pub(crate) assumptions: ValuationInputs,
    pub(crate) outcome: SolverOutcome,
    pub(crate) valuation: ValuationResult,
    pub(crate) projected_cash_flows: ProjectedCashFlows,
    pub(crate) historical_growth: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) latest_growth: Option<f64>,
    pub(crate) verdict: Option<GrowthVerdict>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) peers: Option<PeerComparison>,
}

impl ValuationBrief {
    /// Assemble a brief from a finished solve.
    ///
    /// The valuation and projection are recomputed at the implied growth rate,
    /// so they describe the path the market price assumes.
    pub(crate) fn new(
        ticker: impl Into<Ticker>,
        assumptions: ValuationInputs,
        outcome: SolverOutcome,
        historical_growth: Option<f64>,
    ) -> Result<Self> {
        let implied = assumptions.with_growth_rate(outcome.implied_growth_rate);
        let valuation = aggregate(&implied)?;
        let projected_cash_flows =
            project(implied.base_cash_flow, implied.growth_rate, implied.projection_years)?;
        let verdict =
            historical_growth.and_then(|h| GrowthVerdict::assess(outcome.implied_growth_rate, h));

        Ok(Self {
            ticker: ticker.into(),
            company_name: None,
            assumptions: implied,
            outcome,
            valuation,
            projected_cash_flows,
            historical_growth,
            latest_growth: None,
            verdict,
            peers: None,
        })
    }

    pub(crate) fn with_company_name(mut self, name: Option<String>) -> Self {
        self.company_name = name.filter(|n| !n.is_empty());
        self
    }

    /// Year-over-year revenue growth of the latest statement, for context
    /// beside the multi-year rate the verdict uses.
    pub(crate) const fn with_latest_growth(mut self, growth: Option<f64>) -> Self {
        self.latest_growth = growth;
        self
    }

    pub(crate) fn with_peers(mut self, peers: PeerComparison) -> Self {
        self.peers = Some(peers);
        self
    }
}
