//! Momentum indicators.

use trading_core::traits::{Indicator, MultiOutputIndicator};
use trading_core::types::MacdOutput;

use crate::moving_average::{Ema, Sma};

/// Relative Strength Index (RSI).
///
/// Simple rolling means of the gains and losses of close-to-close changes
/// over `period` changes. The first value belongs to input index `period`.
/// A window without losses reads 100; a window without any change reads 50.
#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
}

impl Rsi {
    /// Create a new RSI indicator.
    pub fn new(period: usize) -> Self {
        assert!(period > 0, "Period must be greater than 0");
        Self { period }
    }

    /// RSI from average gain and loss.
    ///
    /// A flat window (no gains, no losses) is undefined as a ratio. It is
    /// reported as a neutral 50 so the row is kept, instead of being treated
    /// as a warm-up row and dropped.
    fn from_averages(gain: f64, loss: f64) -> f64 {
        if loss == 0.0 {
            if gain == 0.0 {
                50.0
            } else {
                100.0
            }
        } else {
            100.0 - (100.0 / (1.0 + gain / loss))
        }
    }
}

impl Indicator for Rsi {
    type Output = f64;

    fn calculate(&self, data: &[f64]) -> Vec<f64> {
        if data.len() <= self.period {
            return vec![];
        }

        let (gains, losses): (Vec<f64>, Vec<f64>) = data
            .windows(2)
            .map(|w| {
                let change = w[1] - w[0];
                (change.max(0.0), (-change).max(0.0))
            })
            .unzip();

        let sma = Sma::new(self.period);
        let avg_gains = sma.calculate(&gains);
        let avg_losses = sma.calculate(&losses);

        avg_gains
            .iter()
            .zip(avg_losses.iter())
            .map(|(&gain, &loss)| Self::from_averages(gain, loss))
            .collect()
    }

    fn period(&self) -> usize {
        self.period + 1
    }

    fn name(&self) -> &str {
        "RSI"
    }
}

/// MACD indicator.
///
/// Fast EMA minus slow EMA, a signal EMA of that line and their difference.
/// All three EMAs are seeded with their first input, so every input row
/// gets a value.
#[derive(Debug, Clone)]
pub struct Macd {
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    /// Create a new MACD with default parameters (12, 26, 9).
    pub fn new() -> Self {
        Self::with_periods(12, 26, 9)
    }

    /// Create a MACD with custom periods.
    pub fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        assert!(fast > 0 && slow > 0 && signal > 0);
        assert!(fast < slow, "Fast period must be less than slow period");
        Self {
            fast: Ema::new(fast),
            slow: Ema::new(slow),
            signal: Ema::new(signal),
        }
    }
}

impl Default for Macd {
    fn default() -> Self {
        Self::new()
    }
}

impl MultiOutputIndicator for Macd {
    type Outputs = MacdOutput;

    fn calculate(&self, data: &[f64]) -> Vec<MacdOutput> {
        let fast = self.fast.calculate(data);
        let slow = self.slow.calculate(data);

        let macd_line: Vec<f64> = fast.iter().zip(slow.iter()).map(|(f, s)| f - s).collect();
        let signal_line = self.signal.calculate(&macd_line);

        macd_line
            .iter()
            .zip(signal_line.iter())
            .map(|(&macd, &signal)| MacdOutput {
                macd,
                signal,
                histogram: macd - signal,
            })
            .collect()
    }

    fn period(&self) -> usize {
        1
    }

    fn name(&self) -> &str {
        "MACD"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rsi_bounds() {
        let rsi = Rsi::new(14);
        let data: Vec<f64> = (0..60)
            .map(|i| 100.0 + (i as f64 * 0.5).sin() * 5.0)
            .collect();

        let result = rsi.calculate(&data);
        assert_eq!(result.len(), 60 - 14);

        for value in &result {
            assert!(*value >= 0.0 && *value <= 100.0);
        }
    }

    #[test]
    fn test_rsi_all_gains() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);

        assert_eq!(result.len(), 2);
        assert!((result[0] - 100.0).abs() < 1e-10);
    }

    #[test]
    fn test_rsi_all_losses() {
        let rsi = Rsi::new(5);
        let result = rsi.calculate(&[7.0, 6.0, 5.0, 4.0, 3.0, 2.0, 1.0]);

        assert!(result[0].abs() < 1e-10);
    }

    #[test]
    fn test_rsi_flat_window() {
        let rsi = Rsi::new(3);
        let result = rsi.calculate(&[10.0, 10.0, 10.0, 10.0, 10.0]);

        assert_eq!(result, vec![50.0, 50.0]);
    }

    #[test]
    fn test_rsi_simple_average() {
        // changes: +2, -1, +1 => avg gain 1, avg loss 1/3 => RS 3 => RSI 75
        let rsi = Rsi::new(3);
        let result = rsi.calculate(&[10.0, 12.0, 11.0, 12.0]);

        assert_eq!(result.len(), 1);
        assert!((result[0] - 75.0).abs() < 1e-10);
    }

    #[test]
    fn test_macd_uptrend() {
        let macd = Macd::new();
        let data: Vec<f64> = (0..50).map(|i| 100.0 + i as f64).collect();
        let result = macd.calculate(&data);

        assert_eq!(result.len(), data.len());
        // seeded EMAs start equal
        assert!(result[0].macd.abs() < 1e-12);
        assert!(result.last().unwrap().macd > 0.0);
    }

    #[test]
    fn test_macd_histogram() {
        let macd = Macd::with_periods(5, 10, 3);
        let data: Vec<f64> = (0..30).map(|i| 100.0 + (i as f64).sqrt()).collect();

        for out in macd.calculate(&data) {
            assert!((out.histogram - (out.macd - out.signal)).abs() < 1e-12);
        }
    }
}
