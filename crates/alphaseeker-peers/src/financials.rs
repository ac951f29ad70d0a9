//! Per-company inputs and the EV/EBITDA multiple.

use alphaseeker_traits::{AlphaSeekerError, Result, Ticker};
use serde::{Deserialize, Serialize};

/// Read-only snapshot of the figures a peer comparison needs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeerFinancials {
    /// Ticker symbol
    pub ticker: Ticker,
    /// Year-over-year revenue growth as a ratio (0.10 = 10%)
    pub revenue_growth: f64,
    /// Trailing EBITDA
    pub ebitda: f64,
    /// Enterprise value in the same currency as EBITDA
    pub enterprise_value: f64,
}

impl PeerFinancials {
    /// Create a snapshot.
    pub fn new(
        ticker: impl Into<Ticker>,
        revenue_growth: f64,
        ebitda: f64,
        enterprise_value: f64,
    ) -> Self {
        Self { ticker: ticker.into(), revenue_growth, ebitda, enterprise_value }
    }

    /// Enterprise value over EBITDA. See [`ev_to_ebitda`].
    ///
    /// # Errors
    ///
    /// See [`ev_to_ebitda`].
    pub fn ev_to_ebitda(&self) -> Result<f64> {
        ev_to_ebitda(self)
    }
}

/// Enterprise value over EBITDA.
///
/// # Errors
///
/// - [`AlphaSeekerError::DivisionUndefined`] when EBITDA is zero or negative,
///   where the multiple has no meaning.
/// - [`AlphaSeekerError::InvalidInput`] when any figure is not finite.
pub fn ev_to_ebitda(financials: &PeerFinancials) -> Result<f64> {
    let PeerFinancials { ticker, revenue_growth, ebitda, enterprise_value } = financials;

    if !ebitda.is_finite() || !enterprise_value.is_finite() || !revenue_growth.is_finite() {
        return Err(AlphaSeekerError::InvalidInput(format!(
            "{ticker}: financial figures must be finite"
        )));
    }
    if *ebitda <= 0.0 {
        return Err(AlphaSeekerError::DivisionUndefined { ticker: ticker.clone(), ebitda: *ebitda });
    }

    Ok(enterprise_value / ebitda)
}
