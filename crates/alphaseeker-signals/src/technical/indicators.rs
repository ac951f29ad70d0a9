//! Moving average and RSI over a close series.

/// Mean of the last `window` values.
///
/// Returns `None` when `window` is zero or exceeds the series length.
#[must_use]
pub fn simple_moving_average(values: &[f64], window: usize) -> Option<f64> {
    if window == 0 || values.len() < window {
        return None;
    }
    let tail = &values[values.len() - window..];
    Some(tail.iter().sum::<f64>() / window as f64)
}

/// Relative strength index of the latest `period` price changes.
///
/// Average gain and average loss are simple means over the window (not
/// Wilder smoothing). `RSI = 100 - 100 / (1 + gain / loss)`, which is 100
/// when there were no losses. Returns `None` for a flat window, a zero
/// period, or fewer than `period + 1` values.
#[must_use]
pub fn relative_strength_index(values: &[f64], period: usize) -> Option<f64> {
    if period == 0 || values.len() < period + 1 {
        return None;
    }

    let window = &values[values.len() - period - 1..];
    let (gains, losses) = window.windows(2).fold((0.0, 0.0), |(gain, loss), pair| {
        let change = pair[1] - pair[0];
        if change > 0.0 { (gain + change, loss) } else { (gain, loss - change) }
    });

    let avg_gain = gains / period as f64;
    let avg_loss = losses / period as f64;

    if avg_loss == 0.0 {
        return (avg_gain > 0.0).then_some(100.0);
    }
    Some(100.0 - 100.0 / (1.0 + avg_gain / avg_loss))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sma_uses_latest_window() {
        let values = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_relative_eq!(simple_moving_average(&values, 2).unwrap(), 4.5);
        assert_relative_eq!(simple_moving_average(&values, 5).unwrap(), 3.0);
        assert!(simple_moving_average(&values, 6).is_none());
        assert!(simple_moving_average(&values, 0).is_none());
    }

    #[test]
    fn test_rsi_balanced_moves() {
        // Two gains of 1 and two losses of 1 over four changes.
        let values = [10.0, 11.0, 10.0, 11.0, 10.0];
        assert_relative_eq!(relative_strength_index(&values, 4).unwrap(), 50.0);
    }

    #[test]
    fn test_rsi_weighted_to_gains() {
        // Gains 3, losses 1: rs = 3, rsi = 75.
        let values = [10.0, 13.0, 12.0];
        assert_relative_eq!(relative_strength_index(&values, 2).unwrap(), 75.0);
    }

    #[test]
    fn test_rsi_only_reads_latest_period() {
        let values = [100.0, 1.0, 2.0, 3.0];
        assert_relative_eq!(relative_strength_index(&values, 2).unwrap(), 100.0);
    }

    #[test]
    fn test_rsi_edges() {
        let falling = [5.0, 4.0, 3.0];
        assert_relative_eq!(relative_strength_index(&falling, 2).unwrap(), 0.0);
        assert!(relative_strength_index(&[3.0, 3.0, 3.0], 2).is_none());
        assert!(relative_strength_index(&[1.0, 2.0], 2).is_none());
        assert!(relative_strength_index(&[1.0, 2.0], 0).is_none());
    }
}
