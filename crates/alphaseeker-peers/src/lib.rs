//! Peer valuation metrics for alphaseeker.
//!
//! Ranks a company against its peers by revenue growth per turn of
//! EV/EBITDA and names a better-valued alternative when one exists. Peers
//! whose multiple is undefined are excluded and reported, never fatal.
//!
//! # Examples
//!
//! ```
//! use alphaseeker_peers::{PeerFinancials, compare};
//!
//! let subject = PeerFinancials::new("MSFT", 0.15, 120_000.0, 3_200_000.0);
//! let peers = vec![
//!     PeerFinancials::new("GOOGL", 0.14, 130_000.0, 2_000_000.0),
//!     PeerFinancials::new("ORCL", 0.08, 22_000.0, 480_000.0),
//! ];
//!
//! let comparison = compare(&subject, &peers);
//! if let Some(alt) = comparison.better_alternative() {
//!     println!("{} scores {:.4}", alt.ticker, alt.relative_score);
//! }
//! ```

mod comparison;
mod financials;
mod scorer;

// Re-export main types
pub use comparison::{ComparisonRow, ExcludedPeer, PeerComparison, compare, compare_with};
pub use financials::{PeerFinancials, ev_to_ebitda};
pub use scorer::{GrowthPerMultiple, PeerScorer};
