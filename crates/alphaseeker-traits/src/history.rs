//! Daily price history container.

use crate::{AlphaSeekerError, Date, Result};
use polars::prelude::*;

/// Offset between the Polars date epoch (1970-01-01) and chrono's CE day count.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Daily closing prices for a single ticker.
///
/// `PriceHistory` wraps a Polars DataFrame with at least a `date` column of
/// Date type and a `close` column of f64. Rows are kept sorted by date,
/// oldest first, so indicators can read closes in chronological order.
///
/// # Example
///
/// ```
/// use alphaseeker_traits::{Date, PriceHistory};
///
/// let points = vec![
///     (Date::from_ymd_opt(2024, 1, 3).unwrap(), 101.0),
///     (Date::from_ymd_opt(2024, 1, 2).unwrap(), 100.0),
/// ];
/// let history = PriceHistory::from_points(&points).unwrap();
///
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.closes().unwrap(), vec![100.0, 101.0]);
/// ```
#[derive(Debug, Clone)]
pub struct PriceHistory {
    data: DataFrame,
}

impl PriceHistory {
    /// Columns every price history must carry.
    pub const REQUIRED_COLUMNS: [&'static str; 2] = ["date", "close"];

    /// Wrap an existing DataFrame, sorting it by date.
    ///
    /// # Errors
    ///
    /// Returns [`AlphaSeekerError::MissingColumn`] if `date` or `close` is
    /// absent, or a DataFrame error if sorting fails.
    pub fn new(data: DataFrame) -> Result<Self> {
        for col in Self::REQUIRED_COLUMNS {
            if data.column(col).is_err() {
                return Err(AlphaSeekerError::MissingColumn(col.to_string()));
            }
        }

        let data = data.sort(["date"], Default::default())?;
        Ok(Self { data })
    }

    /// Build a price history from `(date, close)` pairs in any order.
    ///
    /// # Errors
    ///
    /// Returns a DataFrame error if the frame cannot be built.
    pub fn from_points(points: &[(Date, f64)]) -> Result<Self> {
        let dates: Vec<Date> = points.iter().map(|(d, _)| *d).collect();
        let closes: Vec<f64> = points.iter().map(|(_, c)| *c).collect();

        let data = df! {
            "date" => dates,
            "close" => closes,
        }?;

        Self::new(data)
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether there are no rows.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Closing prices, oldest first. Null closes are skipped.
    ///
    /// # Errors
    ///
    /// Returns a DataFrame error if `close` is not a float column.
    pub fn closes(&self) -> Result<Vec<f64>> {
        let closes = self
            .data
            .column("close")?
            .as_materialized_series()
            .f64()?
            .into_iter()
            .flatten()
            .collect();
        Ok(closes)
    }

    /// Date of the most recent row, if any.
    ///
    /// # Errors
    ///
    /// Returns a DataFrame error if `date` is not a Date column.
    pub fn last_date(&self) -> Result<Option<Date>> {
        let last = self
            .data
            .column("date")?
            .as_materialized_series()
            .date()?
            .into_iter()
            .flatten()
            .last();

        Ok(last.and_then(|days| Date::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)))
    }
}

impl TryFrom<DataFrame> for PriceHistory {
    type Error = AlphaSeekerError;

    fn try_from(data: DataFrame) -> Result<Self> {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for PriceHistory {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(d: u32) -> Date {
        Date::from_ymd_opt(2024, 3, d).unwrap()
    }

    #[test]
    fn test_from_points_sorts_by_date() {
        let history =
            PriceHistory::from_points(&[(day(5), 12.0), (day(1), 10.0), (day(3), 11.0)]).unwrap();

        assert_eq!(history.len(), 3);
        assert_eq!(history.closes().unwrap(), vec![10.0, 11.0, 12.0]);
        assert_eq!(history.last_date().unwrap(), Some(day(5)));
    }

    #[test]
    fn test_missing_close_column() {
        let df = df! {
            "date" => vec![day(1)],
            "open" => &[10.0],
        }
        .unwrap();

        let result = PriceHistory::new(df);
        assert!(matches!(result, Err(AlphaSeekerError::MissingColumn(c)) if c == "close"));
    }

    #[test]
    fn test_empty_history() {
        let history = PriceHistory::from_points(&[]).unwrap();
        assert!(history.is_empty());
        assert!(history.closes().unwrap().is_empty());
        assert_eq!(history.last_date().unwrap(), None);
    }

    #[test]
    fn test_into_inner() {
        let history = PriceHistory::from_points(&[(day(1), 10.0)]).unwrap();
        let inner = history.into_inner();
        assert_eq!(inner.height(), 1);
    }
}
