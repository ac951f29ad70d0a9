//! Historical revenue growth.

use alphaseeker_traits::Date;

/// Compound annual growth of revenue across the given statements.
///
/// Statements are sorted by date; the first and last revenues are compared
/// over one period per statement gap, `(end / start)^(1 / periods) - 1`.
/// Returns `None` for fewer than two statements, a non-positive starting or
/// ending revenue, or any non-finite value.
///
/// # Example
///
/// ```
/// use alphaseeker_signals::revenue_cagr;
/// use chrono::NaiveDate;
///
/// let d = |y| NaiveDate::from_ymd_opt(y, 12, 31).unwrap();
/// let cagr = revenue_cagr(&[(d(2022), 121.0), (d(2020), 100.0), (d(2021), 110.0)]).unwrap();
/// assert!((cagr - 0.10).abs() < 1e-12);
/// ```
#[must_use]
pub fn revenue_cagr(revenues: &[(Date, f64)]) -> Option<f64> {
    if revenues.len() < 2 || revenues.iter().any(|(_, r)| !r.is_finite()) {
        return None;
    }

    let mut sorted = revenues.to_vec();
    sorted.sort_by_key(|(date, _)| *date);

    let (_, start) = sorted.first()?;
    let (_, end) = sorted.last()?;
    if *start <= 0.0 || *end <= 0.0 {
        return None;
    }

    let periods = (sorted.len() - 1) as f64;
    Some((end / start).powf(1.0 / periods) - 1.0)
}

/// Year-over-year growth between the two most recent statements.
///
/// Returns `None` under the same conditions as [`revenue_cagr`].
#[must_use]
pub fn latest_growth(revenues: &[(Date, f64)]) -> Option<f64> {
    let mut sorted = revenues.to_vec();
    sorted.sort_by_key(|(date, _)| *date);
    let tail = sorted.len().checked_sub(2).map(|i| &sorted[i..])?;
    revenue_cagr(tail)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use chrono::NaiveDate;

    fn year(y: i32) -> Date {
        NaiveDate::from_ymd_opt(y, 12, 31).unwrap()
    }

    #[test]
    fn test_cagr_over_five_statements() {
        let revenues: Vec<(Date, f64)> =
            (0..5).map(|i| (year(2020 + i), 100.0 * 1.08_f64.powi(i))).collect();
        assert_relative_eq!(revenue_cagr(&revenues).unwrap(), 0.08, epsilon = 1e-12);
    }

    #[test]
    fn test_unsorted_input() {
        let revenues = [(year(2021), 50.0), (year(2019), 200.0), (year(2020), 100.0)];
        assert_relative_eq!(revenue_cagr(&revenues).unwrap(), -0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_undefined_cases() {
        assert!(revenue_cagr(&[]).is_none());
        assert!(revenue_cagr(&[(year(2020), 100.0)]).is_none());
        assert!(revenue_cagr(&[(year(2020), 0.0), (year(2021), 100.0)]).is_none());
        assert!(revenue_cagr(&[(year(2020), 100.0), (year(2021), -5.0)]).is_none());
        assert!(revenue_cagr(&[(year(2020), f64::NAN), (year(2021), 100.0)]).is_none());
    }

    #[test]
    fn test_latest_growth() {
        let revenues = [(year(2020), 100.0), (year(2022), 132.0), (year(2021), 120.0)];
        assert_relative_eq!(latest_growth(&revenues).unwrap(), 0.10, epsilon = 1e-12);
        assert!(latest_growth(&revenues[..1]).is_none());
    }
}
