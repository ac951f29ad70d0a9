//! Scoring rules that rank peers.

/// Turns a peer's growth and valuation multiple into one comparable score.
///
/// Higher scores rank first. Implementations must be deterministic so that
/// repeated comparisons produce the same ordering.
///
/// # Examples
///
/// ```
/// use alphaseeker_peers::PeerScorer;
///
/// /// Prefer the cheapest multiple regardless of growth.
/// struct Cheapest;
///
/// impl PeerScorer for Cheapest {
///     fn name(&self) -> &str {
///         "cheapest"
///     }
///
///     fn score(&self, _revenue_growth: f64, ev_to_ebitda: f64) -> f64 {
///         -ev_to_ebitda
///     }
/// }
///
/// assert!(Cheapest.score(0.1, 8.0) > Cheapest.score(0.3, 12.0));
/// ```
pub trait PeerScorer: Send + Sync {
    /// Name of this scoring rule.
    fn name(&self) -> &str;

    /// Score one company.
    fn score(&self, revenue_growth: f64, ev_to_ebitda: f64) -> f64;
}

/// Revenue growth bought per turn of EV/EBITDA.
///
/// `revenue_growth / ev_to_ebitda`: a peer growing as fast at a lower
/// multiple scores higher.
#[derive(Debug, Clone, Copy, Default)]
pub struct GrowthPerMultiple;

impl PeerScorer for GrowthPerMultiple {
    fn name(&self) -> &str {
        "growth_per_multiple"
    }

    fn score(&self, revenue_growth: f64, ev_to_ebitda: f64) -> f64 {
        revenue_growth / ev_to_ebitda
    }
}
