//! Indicator configuration and indicator-augmented bars.

use serde::{Deserialize, Serialize};

use super::Bar;
use crate::error::IndicatorError;

/// Indicator parameters for one chart timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorConfig {
    /// Simple moving average windows, drawn in this order
    pub moving_averages: Vec<usize>,
    /// RSI lookback
    pub rsi_period: usize,
    /// MACD fast EMA span
    pub macd_fast: usize,
    /// MACD slow EMA span
    pub macd_slow: usize,
    /// MACD signal EMA span
    pub macd_signal: usize,
    /// Bollinger rolling window
    pub bollinger_period: usize,
    /// Bollinger standard deviation multiplier
    pub bollinger_dev: f64,
}

impl IndicatorConfig {
    /// Preset for daily charts, including the long-term 200 MA.
    pub fn daily() -> Self {
        Self {
            moving_averages: vec![20, 50, 200],
            ..Self::intraday()
        }
    }

    /// Preset for intraday charts. The 200 MA is left out so shorter
    /// series still survive the warm-up.
    pub fn intraday() -> Self {
        Self {
            moving_averages: vec![20, 50],
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bollinger_period: 20,
            bollinger_dev: 2.0,
        }
    }

    /// Check parameters before any series is computed.
    pub fn validate(&self) -> Result<(), IndicatorError> {
        if self.moving_averages.is_empty() {
            return Err(IndicatorError::InvalidParameter(
                "at least one moving average window is required".into(),
            ));
        }
        if self.moving_averages.contains(&0) {
            return Err(IndicatorError::InvalidParameter(
                "moving average windows must be positive".into(),
            ));
        }
        if self.rsi_period == 0 {
            return Err(IndicatorError::InvalidParameter(
                "RSI period must be positive".into(),
            ));
        }
        if self.macd_fast == 0 || self.macd_slow == 0 || self.macd_signal == 0 {
            return Err(IndicatorError::InvalidParameter(
                "MACD periods must be positive".into(),
            ));
        }
        if self.macd_fast >= self.macd_slow {
            return Err(IndicatorError::InvalidParameter(format!(
                "MACD fast period ({}) must be less than slow period ({})",
                self.macd_fast, self.macd_slow
            )));
        }
        if self.bollinger_period < 2 {
            return Err(IndicatorError::InvalidParameter(
                "Bollinger period must be at least 2".into(),
            ));
        }
        if self.bollinger_dev.is_nan() || self.bollinger_dev <= 0.0 {
            return Err(IndicatorError::InvalidParameter(
                "Bollinger deviation multiplier must be positive".into(),
            ));
        }
        Ok(())
    }

    /// Number of leading rows that cannot carry every indicator value.
    pub fn warmup_period(&self) -> usize {
        let ma = self
            .moving_averages
            .iter()
            .max()
            .map(|w| w.saturating_sub(1))
            .unwrap_or(0);
        ma.max(self.rsi_period)
            .max(self.bollinger_period.saturating_sub(1))
    }
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self::daily()
    }
}

/// MACD (Moving Average Convergence Divergence) output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MacdOutput {
    /// MACD line (fast EMA - slow EMA)
    pub macd: f64,
    /// Signal line (EMA of MACD)
    pub signal: f64,
    /// Histogram (MACD - Signal)
    pub histogram: f64,
}

/// Bollinger Bands output.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollingerOutput {
    /// Upper band
    pub upper: f64,
    /// Middle band (SMA)
    pub middle: f64,
    /// Lower band
    pub lower: f64,
}

/// A bar with every configured indicator value defined.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentedBar {
    pub bar: Bar,
    /// One value per configured moving average window, same order
    pub moving_averages: Vec<f64>,
    pub rsi: f64,
    pub macd: MacdOutput,
    pub bollinger: BollingerOutput,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_moving_averages() {
        let daily = IndicatorConfig::daily();
        let intraday = IndicatorConfig::intraday();

        assert_eq!(daily.moving_averages, vec![20, 50, 200]);
        assert_eq!(intraday.moving_averages, vec![20, 50]);
        assert_eq!(
            IndicatorConfig {
                moving_averages: intraday.moving_averages.clone(),
                ..daily
            },
            intraday
        );
    }

    #[test]
    fn test_warmup_period() {
        assert_eq!(IndicatorConfig::daily().warmup_period(), 199);
        assert_eq!(IndicatorConfig::intraday().warmup_period(), 49);

        let rsi_heavy = IndicatorConfig {
            moving_averages: vec![5],
            rsi_period: 30,
            ..IndicatorConfig::intraday()
        };
        assert_eq!(rsi_heavy.warmup_period(), 30);
    }

    #[test]
    fn test_validate() {
        assert!(IndicatorConfig::daily().validate().is_ok());

        let bad_macd = IndicatorConfig {
            macd_fast: 26,
            macd_slow: 12,
            ..IndicatorConfig::daily()
        };
        assert!(bad_macd.validate().is_err());

        let zero_ma = IndicatorConfig {
            moving_averages: vec![20, 0],
            ..IndicatorConfig::daily()
        };
        assert!(zero_ma.validate().is_err());

        let no_dev = IndicatorConfig {
            bollinger_dev: 0.0,
            ..IndicatorConfig::daily()
        };
        assert!(no_dev.validate().is_err());
    }
}
