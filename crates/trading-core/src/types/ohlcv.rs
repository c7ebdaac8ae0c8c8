//! OHLCV (Open, High, Low, Close, Volume) bars.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One OHLCV sample for a fixed interval.
/// Uses f64 for fast indicator calculations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Unix timestamp in milliseconds
    pub timestamp: i64,
    /// Opening price
    pub open: f64,
    /// Highest price
    pub high: f64,
    /// Lowest price
    pub low: f64,
    /// Closing price
    pub close: f64,
    /// Trading volume
    pub volume: f64,
}

impl Bar {
    /// Create a new bar.
    pub fn new(timestamp: i64, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            timestamp,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Check if the bar is bullish (close > open).
    #[inline]
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }

    /// All four prices are finite numbers.
    pub fn has_finite_prices(&self) -> bool {
        self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite()
    }

    /// Get the timestamp as a DateTime.
    pub fn datetime(&self) -> DateTime<Utc> {
        DateTime::from_timestamp_millis(self.timestamp).unwrap_or(DateTime::UNIX_EPOCH)
    }

    /// Sort by timestamp, keep the last bar for any repeated timestamp and
    /// drop bars whose prices are not finite.
    pub fn normalize(mut bars: Vec<Bar>) -> Vec<Bar> {
        bars.retain(Bar::has_finite_prices);
        // Stable sort keeps arrival order among equal timestamps.
        bars.sort_by_key(|b| b.timestamp);

        let mut out: Vec<Bar> = Vec::with_capacity(bars.len());
        for bar in bars {
            match out.last_mut() {
                Some(last) if last.timestamp == bar.timestamp => *last = bar,
                _ => out.push(bar),
            }
        }
        out
    }

    /// Keep only the newest `count` bars of an ascending sequence.
    pub fn tail(mut bars: Vec<Bar>, count: usize) -> Vec<Bar> {
        let start = bars.len().saturating_sub(count);
        bars.drain(..start);
        bars
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bar_direction() {
        let bar = Bar::new(1000, 100.0, 110.0, 95.0, 105.0, 1000000.0);
        assert!(bar.is_bullish());
        assert!(bar.has_finite_prices());
    }

    #[test]
    fn test_normalize_sorts_and_dedups() {
        let bars = vec![
            Bar::new(3, 1.0, 1.0, 1.0, 3.0, 0.0),
            Bar::new(1, 1.0, 1.0, 1.0, 1.0, 0.0),
            Bar::new(3, 1.0, 1.0, 1.0, 3.5, 0.0),
            Bar::new(2, 1.0, 1.0, 1.0, f64::NAN, 0.0),
        ];

        let normalized = Bar::normalize(bars);
        let timestamps: Vec<i64> = normalized.iter().map(|b| b.timestamp).collect();
        assert_eq!(timestamps, vec![1, 3]);
        // Last occurrence wins
        assert_eq!(normalized[1].close, 3.5);
    }

    #[test]
    fn test_tail() {
        let bars: Vec<Bar> = (0..10).map(|i| Bar::new(i, 1.0, 1.0, 1.0, 1.0, 0.0)).collect();
        let tail = Bar::tail(bars.clone(), 3);
        assert_eq!(tail.len(), 3);
        assert_eq!(tail[0].timestamp, 7);

        assert_eq!(Bar::tail(bars, 50).len(), 10);
    }
}
