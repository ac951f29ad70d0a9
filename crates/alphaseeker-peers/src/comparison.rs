//! Ranking a company against its peers.

use crate::{
    financials::PeerFinancials,
    scorer::{GrowthPerMultiple, PeerScorer},
};
use alphaseeker_traits::{AlphaSeekerError, Ticker};
use serde::{Serialize, Serializer};
use std::{cmp::Ordering, collections::HashSet};
use tracing::debug;

/// One ranked company.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    /// Ticker symbol
    pub ticker: Ticker,
    /// Enterprise value over EBITDA
    pub ev_to_ebitda: f64,
    /// Year-over-year revenue growth
    pub revenue_growth: f64,
    /// Score from the comparison's [`PeerScorer`]; higher is better
    pub relative_score: f64,
}

/// A company left out of the ranking, with the reason.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExcludedPeer {
    /// Ticker symbol
    pub ticker: Ticker,
    /// Why no row could be computed
    #[serde(serialize_with = "serialize_display")]
    pub reason: AlphaSeekerError,
}

fn serialize_display<S: Serializer>(
    error: &AlphaSeekerError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// Outcome of comparing a subject company with its peers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerComparison {
    /// Name of the scoring rule used
    pub scorer: String,
    /// The subject's own row, if its metrics are defined
    pub subject: Option<ComparisonRow>,
    /// Peers ranked best first
    pub rows: Vec<ComparisonRow>,
    /// Companies without a row, the subject included when its metrics fail
    pub excluded: Vec<ExcludedPeer>,
}

impl PeerComparison {
    /// The top-ranked peer, if it strictly beats the subject.
    ///
    /// When the subject has no score of its own (for example non-positive
    /// EBITDA), any ranked peer is a better alternative.
    #[must_use]
    pub fn better_alternative(&self) -> Option<&ComparisonRow> {
        let best = self.rows.first()?;
        match &self.subject {
            Some(subject) if best.relative_score <= subject.relative_score => None,
            _ => Some(best),
        }
    }

    /// Look up a ranked peer by ticker.
    #[must_use]
    pub fn row(&self, ticker: &str) -> Option<&ComparisonRow> {
        self.rows.iter().find(|r| r.ticker == ticker)
    }
}

/// Compare a subject with its peers using [`GrowthPerMultiple`].
///
/// # Example
///
/// ```
/// use alphaseeker_peers::{PeerFinancials, compare};
///
/// let subject = PeerFinancials::new("SUBJ", 0.05, 100.0, 2_000.0);
/// let peers = [
///     PeerFinancials::new("A", 0.20, 50.0, 500.0),
///     PeerFinancials::new("B", 0.10, 0.0, 300.0),
/// ];
///
/// let comparison = compare(&subject, &peers);
/// assert_eq!(comparison.rows.len(), 1);
/// assert_eq!(comparison.excluded[0].ticker, "B");
/// assert_eq!(comparison.better_alternative().unwrap().ticker, "A");
/// ```
#[must_use]
pub fn compare(subject: &PeerFinancials, peers: &[PeerFinancials]) -> PeerComparison {
    compare_with(&GrowthPerMultiple, subject, peers)
}

/// Compare a subject with its peers using a custom scoring rule.
///
/// Peers whose metrics cannot be computed are excluded and recorded; the rest
/// of the batch is still ranked. A non-positive multiple (zero or negative
/// enterprise value) is excluded as well, since dividing growth by it would
/// reward shrinking companies. Peers sharing the subject's ticker are
/// skipped, and only the first of several entries with the same ticker is
/// used. Rows are ordered by score descending, then revenue growth
/// descending, then ticker ascending, so the order is fully determined by the
/// inputs.
#[must_use]
pub fn compare_with<S: PeerScorer + ?Sized>(
    scorer: &S,
    subject: &PeerFinancials,
    peers: &[PeerFinancials],
) -> PeerComparison {
    let mut excluded = Vec::new();

    let subject_row = match row_for(scorer, subject) {
        Ok(row) => Some(row),
        Err(reason) => {
            debug!(ticker = %subject.ticker, %reason, "subject has no comparable metrics");
            excluded.push(ExcludedPeer { ticker: subject.ticker.clone(), reason });
            None
        }
    };

    let mut seen: HashSet<&str> = HashSet::from([subject.ticker.as_str()]);
    let mut rows = Vec::with_capacity(peers.len());
    for peer in peers {
        if !seen.insert(peer.ticker.as_str()) {
            continue;
        }
        match row_for(scorer, peer) {
            Ok(row) => rows.push(row),
            Err(reason) => {
                debug!(ticker = %peer.ticker, %reason, "peer excluded from comparison");
                excluded.push(ExcludedPeer { ticker: peer.ticker.clone(), reason });
            }
        }
    }

    rows.sort_by(rank_order);

    PeerComparison { scorer: scorer.name().to_string(), subject: subject_row, rows, excluded }
}

fn row_for<S: PeerScorer + ?Sized>(
    scorer: &S,
    financials: &PeerFinancials,
) -> Result<ComparisonRow, AlphaSeekerError> {
    let ev_to_ebitda = financials.ev_to_ebitda()?;
    // Growth per turn of multiple only ranks sensibly for a positive multiple.
    if ev_to_ebitda <= 0.0 {
        return Err(AlphaSeekerError::InvalidInput(format!(
            "{}: EV/EBITDA {ev_to_ebitda} is not positive (enterprise value {})",
            financials.ticker, financials.enterprise_value
        )));
    }
    let relative_score = scorer.score(financials.revenue_growth, ev_to_ebitda);
    if !relative_score.is_finite() {
        return Err(AlphaSeekerError::InvalidInput(format!(
            "{}: score is undefined at EV/EBITDA {ev_to_ebitda}",
            financials.ticker
        )));
    }

    Ok(ComparisonRow {
        ticker: financials.ticker.clone(),
        ev_to_ebitda,
        revenue_growth: financials.revenue_growth,
        relative_score,
    })
}

fn rank_order(a: &ComparisonRow, b: &ComparisonRow) -> Ordering {
    b.relative_score
        .total_cmp(&a.relative_score)
        .then_with(|| b.revenue_growth.total_cmp(&a.revenue_growth))
        .then_with(|| a.ticker.cmp(&b.ticker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn peers() -> Vec<PeerFinancials> {
        vec![
            PeerFinancials::new("A", 0.20, 50.0, 500.0),
            PeerFinancials::new("B", 0.10, 0.0, 300.0),
        ]
    }

    #[test]
    fn test_zero_ebitda_peer_excluded() {
        let subject = PeerFinancials::new("SUBJ", 0.05, 100.0, 2_000.0);
        let comparison = compare(&subject, &peers());

        assert_eq!(comparison.rows.len(), 1);
        let a = &comparison.rows[0];
        assert_eq!(a.ticker, "A");
        assert_relative_eq!(a.ev_to_ebitda, 10.0);
        assert_relative_eq!(a.relative_score, 0.02);

        assert_eq!(comparison.excluded.len(), 1);
        assert_eq!(comparison.excluded[0].ticker, "B");
        assert!(matches!(
            comparison.excluded[0].reason,
            AlphaSeekerError::DivisionUndefined { .. }
        ));
    }

    #[test]
    fn test_better_alternative_must_strictly_win() {
        // Subject scores 0.05 / 20 = 0.0025, A scores 0.02.
        let weak = PeerFinancials::new("SUBJ", 0.05, 100.0, 2_000.0);
        assert_eq!(compare(&weak, &peers()).better_alternative().unwrap().ticker, "A");

        // Same score as A: not better.
        let tied = PeerFinancials::new("SUBJ", 0.20, 50.0, 500.0);
        assert!(compare(&tied, &peers()).better_alternative().is_none());

        let strong = PeerFinancials::new("SUBJ", 0.40, 50.0, 500.0);
        assert!(compare(&strong, &peers()).better_alternative().is_none());
    }

    #[test]
    fn test_subject_without_metrics() {
        let subject = PeerFinancials::new("SUBJ", 0.05, -10.0, 2_000.0);
        let comparison = compare(&subject, &peers());

        assert!(comparison.subject.is_none());
        assert!(comparison.excluded.iter().any(|e| e.ticker == "SUBJ"));
        assert_eq!(comparison.better_alternative().unwrap().ticker, "A");
    }

    #[test]
    fn test_tie_breaks() {
        let subject = PeerFinancials::new("SUBJ", 0.0, 1.0, 100.0);
        let peers = [
            // All three score 0.01.
            PeerFinancials::new("ZED", 0.10, 10.0, 100.0),
            PeerFinancials::new("ALPHA", 0.10, 10.0, 100.0),
            PeerFinancials::new("FAST", 0.20, 10.0, 200.0),
            PeerFinancials::new("TOP", 0.30, 10.0, 100.0),
        ];
        let comparison = compare(&subject, &peers);
        let order: Vec<&str> = comparison.rows.iter().map(|r| r.ticker.as_str()).collect();
        assert_eq!(order, vec!["TOP", "FAST", "ALPHA", "ZED"]);
    }

    #[test]
    fn test_ordering_is_repeatable() {
        let subject = PeerFinancials::new("SUBJ", 0.05, 100.0, 2_000.0);
        let mut peers = peers();
        peers.push(PeerFinancials::new("C", 0.15, 40.0, 600.0));
        peers.push(PeerFinancials::new("D", 0.15, 40.0, 600.0));

        assert_eq!(compare(&subject, &peers), compare(&subject, &peers));
    }

    #[test]
    fn test_subject_and_duplicates_skipped() {
        let subject = PeerFinancials::new("A", 0.20, 50.0, 500.0);
        let peers = [
            PeerFinancials::new("A", 0.90, 50.0, 500.0),
            PeerFinancials::new("C", 0.10, 10.0, 100.0),
            PeerFinancials::new("C", 0.90, 10.0, 100.0),
        ];
        let comparison = compare(&subject, &peers);

        assert_eq!(comparison.rows.len(), 1);
        assert_relative_eq!(comparison.row("C").unwrap().revenue_growth, 0.10);
        assert!(comparison.row("A").is_none());
    }

    #[test]
    fn test_undefined_score_excluded() {
        struct LogGrowth;
        impl PeerScorer for LogGrowth {
            fn name(&self) -> &str {
                "log_growth"
            }
            fn score(&self, revenue_growth: f64, _ev_to_ebitda: f64) -> f64 {
                revenue_growth.ln()
            }
        }

        let subject = PeerFinancials::new("SUBJ", 0.05, 100.0, 2_000.0);
        let peers = [PeerFinancials::new("SHRINK", -0.10, 10.0, 100.0)];
        let comparison = compare_with(&LogGrowth, &subject, &peers);

        assert!(comparison.rows.is_empty());
        assert!(matches!(comparison.excluded[0].reason, AlphaSeekerError::InvalidInput(_)));
        assert!(comparison.excluded[0].reason.to_string().contains("undefined"));
    }

    #[test]
    fn test_serializes_reason_as_text() {
        let subject = PeerFinancials::new("SUBJ", 0.05, 100.0, 2_000.0);
        let json = serde_json::to_value(compare(&subject, &peers())).unwrap();

        assert_eq!(json["scorer"], "growth_per_multiple");
        assert!(json["excluded"][0]["reason"].as_str().unwrap().contains("EBITDA"));
    }

    #[test]
    fn test_negative_enterprise_value_excluded() {
        let subject = PeerFinancials::new("SUBJ", 0.05, 100.0, 2_000.0);
        let peers = [
            PeerFinancials::new("CASHY", -0.30, 50.0, -400.0),
            PeerFinancials::new("ZERO", 0.10, 50.0, 0.0),
            PeerFinancials::new("A", 0.01, 50.0, 500.0),
        ];
        let comparison = compare(&subject, &peers);

        assert_eq!(comparison.rows.len(), 1);
        assert_eq!(comparison.rows[0].ticker, "A");
        assert!(comparison.better_alternative().is_none());

        let excluded: Vec<&str> = comparison.excluded.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(excluded, vec!["CASHY", "ZERO"]);
        assert!(comparison.excluded[0].reason.to_string().contains("not positive"));
    }
}
