//! Error types for AlphaSeeker.
//!
//! Every valuation, comparison and price-history operation reports failures
//! through [`AlphaSeekerError`]. None of the variants are fatal: they describe
//! a single call that could not produce a number, and the caller decides
//! whether to reparameterize, drop the row, or surface the message.

use thiserror::Error;

/// The main error type for AlphaSeeker operations.
///
/// The enum is `Clone` and `PartialEq` so that excluded peers and memoized
/// solver outcomes can carry the error alongside their data.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlphaSeekerError {
    /// The discount rate does not exceed the terminal growth rate, so the
    /// perpetuity does not converge.
    #[error("Invalid assumption: {0}")]
    InvalidAssumption(String),

    /// The target value cannot be reached by any growth rate inside the
    /// search bracket.
    #[error(
        "No implied growth rate in [{lower:.4}, {upper:.4}]: model value ranges from \
         {value_at_lower:.2} to {value_at_upper:.2}, target is {target:.2}"
    )]
    NoRootInBracket {
        /// Lower end of the growth bracket.
        lower: f64,
        /// Upper end of the growth bracket.
        upper: f64,
        /// Intrinsic value at the lower end.
        value_at_lower: f64,
        /// Intrinsic value at the upper end.
        value_at_upper: f64,
        /// Observed market value the solver tried to match.
        target: f64,
    },

    /// EV/EBITDA is undefined because EBITDA is zero or negative.
    #[error("EV/EBITDA undefined for {ticker}: EBITDA is {ebitda}")]
    DivisionUndefined {
        /// Ticker of the excluded company.
        ticker: String,
        /// The offending EBITDA figure.
        ebitda: f64,
    },

    /// Input outside the domain of the operation.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not enough observations for the requested calculation.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),

    /// A required column is missing from a price history frame.
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// Error from Polars operations.
    #[error("DataFrame error: {0}")]
    DataFrame(String),
}

impl AlphaSeekerError {
    /// Whether this error is a valuation signal rather than a usage mistake.
    ///
    /// An unreachable target means the market price implies growth outside
    /// the assumed range, which callers present as "implausible at these
    /// assumptions" instead of a failure.
    #[must_use]
    pub const fn is_valuation_signal(&self) -> bool {
        matches!(self, Self::NoRootInBracket { .. })
    }
}

impl From<polars::error::PolarsError> for AlphaSeekerError {
    fn from(err: polars::error::PolarsError) -> Self {
        Self::DataFrame(err.to_string())
    }
}

/// A specialized Result type for AlphaSeeker operations.
pub type Result<T> = std::result::Result<T, AlphaSeekerError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AlphaSeekerError::InvalidAssumption("discount rate 0.02 <= 0.02".to_string());
        assert_eq!(err.to_string(), "Invalid assumption: discount rate 0.02 <= 0.02");

        let err = AlphaSeekerError::DivisionUndefined {
            ticker: "B".to_string(),
            ebitda: 0.0,
        };
        assert_eq!(err.to_string(), "EV/EBITDA undefined for B: EBITDA is 0");
    }

    #[test]
    fn test_no_root_display_mentions_target() {
        let err = AlphaSeekerError::NoRootInBracket {
            lower: -0.5,
            upper: 0.5,
            value_at_lower: 100.0,
            value_at_upper: 900.0,
            target: 5000.0,
        };
        let msg = err.to_string();
        assert!(msg.contains("[-0.5000, 0.5000]"));
        assert!(msg.contains("5000.00"));
        assert!(err.is_valuation_signal());
    }

    #[test]
    fn test_usage_errors_are_not_signals() {
        assert!(!AlphaSeekerError::InvalidInput("years".into()).is_valuation_signal());
        assert!(!AlphaSeekerError::InvalidAssumption("r".into()).is_valuation_signal());
    }

    #[test]
    fn test_result_type() {
        let ok_result: Result<i32> = Ok(42);
        assert!(ok_result.is_ok());

        let err_result: Result<i32> = Err(AlphaSeekerError::InsufficientData("empty".into()));
        assert!(err_result.is_err());
    }
}
