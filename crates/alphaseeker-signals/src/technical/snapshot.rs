//! Latest technical reading of a price history.

use super::indicators::{relative_strength_index, simple_moving_average};
use alphaseeker_traits::{AlphaSeekerError, Date, PriceHistory, Result};
use serde::{Deserialize, Serialize};

/// Configuration for the technical snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TechnicalConfig {
    /// Short moving-average window in trading days (default: 50)
    pub sma_short_window: usize,
    /// Long moving-average window in trading days (default: 200)
    pub sma_long_window: usize,
    /// RSI lookback in trading days (default: 14)
    pub rsi_period: usize,
    /// RSI above this is overbought (default: 70)
    pub overbought: f64,
    /// RSI below this is oversold (default: 30)
    pub oversold: f64,
}

impl Default for TechnicalConfig {
    fn default() -> Self {
        Self {
            sma_short_window: 50,
            sma_long_window: 200,
            rsi_period: 14,
            overbought: 70.0,
            oversold: 30.0,
        }
    }
}

impl TechnicalConfig {
    /// Check windows and thresholds.
    ///
    /// # Errors
    ///
    /// Returns [`AlphaSeekerError::InvalidInput`] for a zero window or period,
    /// or thresholds outside `[0, 100]` with `oversold < overbought`.
    pub fn validate(&self) -> Result<()> {
        if self.sma_short_window == 0 || self.sma_long_window == 0 || self.rsi_period == 0 {
            return Err(AlphaSeekerError::InvalidInput(
                "technical windows must be at least one day".to_string(),
            ));
        }
        let in_range = |v: f64| (0.0..=100.0).contains(&v);
        if !in_range(self.oversold)
            || !in_range(self.overbought)
            || self.oversold >= self.overbought
        {
            return Err(AlphaSeekerError::InvalidInput(format!(
                "RSI thresholds must satisfy 0 <= oversold < overbought <= 100, got {} and {}",
                self.oversold, self.overbought
            )));
        }
        Ok(())
    }
}

/// Price position relative to the moving averages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trend {
    /// Close above both averages.
    Bullish,
    /// Close below both averages.
    Bearish,
    /// Close between the averages.
    Mixed,
    /// Not enough history for both averages.
    Unknown,
}

/// RSI band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiZone {
    /// Above the overbought threshold.
    Overbought,
    /// Below the oversold threshold.
    Oversold,
    /// Between the thresholds.
    Neutral,
}

impl RsiZone {
    /// Classify an RSI reading.
    #[must_use]
    pub fn classify(rsi: f64, config: &TechnicalConfig) -> Self {
        if rsi > config.overbought {
            Self::Overbought
        } else if rsi < config.oversold {
            Self::Oversold
        } else {
            Self::Neutral
        }
    }
}

/// Latest close, moving averages, and RSI of one price history.
///
/// Indicators that need more history than is available are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TechnicalSnapshot {
    /// Date of the latest close
    pub as_of: Option<Date>,
    /// Latest close
    pub last_close: f64,
    /// Short moving average
    pub sma_short: Option<f64>,
    /// Long moving average
    pub sma_long: Option<f64>,
    /// Relative strength index
    pub rsi: Option<f64>,
    /// Close relative to the averages
    pub trend: Trend,
    /// RSI band, when RSI is defined
    pub rsi_zone: Option<RsiZone>,
}

impl TechnicalSnapshot {
    /// Compute the snapshot for a price history.
    ///
    /// # Errors
    ///
    /// - [`AlphaSeekerError::InvalidInput`] if the configuration is invalid.
    /// - [`AlphaSeekerError::InsufficientData`] if the history has no closes.
    /// - DataFrame errors if the history columns have the wrong types.
    pub fn from_history(history: &PriceHistory, config: &TechnicalConfig) -> Result<Self> {
        let closes = history.closes()?;
        let as_of = history.last_date()?;
        Self::from_closes(&closes, as_of, config)
    }

    /// Compute the snapshot from a close series, oldest first.
    ///
    /// # Errors
    ///
    /// See [`from_history`](Self::from_history).
    pub fn from_closes(
        closes: &[f64],
        as_of: Option<Date>,
        config: &TechnicalConfig,
    ) -> Result<Self> {
        config.validate()?;

        let last_close = *closes.last().ok_or_else(|| {
            AlphaSeekerError::InsufficientData("price history has no closes".to_string())
        })?;

        let sma_short = simple_moving_average(closes, config.sma_short_window);
        let sma_long = simple_moving_average(closes, config.sma_long_window);
        let rsi = relative_strength_index(closes, config.rsi_period);

        let trend = match (sma_short, sma_long) {
            (Some(short), Some(long)) if last_close > short && last_close > long => Trend::Bullish,
            (Some(short), Some(long)) if last_close < short && last_close < long => Trend::Bearish,
            (Some(_), Some(_)) => Trend::Mixed,
            _ => Trend::Unknown,
        };

        Ok(Self {
            as_of,
            last_close,
            sma_short,
            sma_long,
            rsi,
            trend,
            rsi_zone: rsi.map(|value| RsiZone::classify(value, config)),
        })
    }
}
