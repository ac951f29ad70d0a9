//! Financial Modeling Prep (FMP) API client for alphaseeker.
//!
//! Fetches the quotes, statements, peers, prices and insider filings that
//! feed a reverse DCF and a peer comparison from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) stable API.
//!
//! # Usage
//!
//! ```rust,no_run
//! use alphaseeker_fmp::FmpClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?;
//!
//!     // Quote, profile, statements and key metrics in one call
//!     let company = client.company_financials("AAPL", 5).await?;
//!     let inputs = company.valuation_inputs(0.09, 0.025, 10)?;
//!
//!     // Companies to compare against
//!     let peers = client.stock_peers("AAPL").await?;
//!     println!("{} peers, target value {:?}", peers.len(), inputs.target_value);
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::FmpClient;
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
