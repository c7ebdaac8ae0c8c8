//! Aggregation of bars into a coarser timeframe.

use trading_core::types::{Bar, Timeframe};

/// Aggregate ascending bars into `target` buckets aligned to the Unix epoch.
///
/// Each bucket takes the first open, highest high, lowest low, last close and
/// summed volume of its members, stamped with the bucket start.
pub fn resample(bars: &[Bar], target: Timeframe) -> Vec<Bar> {
    let width = target.as_millis();
    let mut out: Vec<Bar> = Vec::new();

    for bar in bars {
        let bucket = bar.timestamp.div_euclid(width) * width;
        match out.last_mut() {
            Some(current) if current.timestamp == bucket => {
                current.high = current.high.max(bar.high);
                current.low = current.low.min(bar.low);
                current.close = bar.close;
                current.volume += bar.volume;
            }
            _ => out.push(Bar::new(
                bucket, bar.open, bar.high, bar.low, bar.close, bar.volume,
            )),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const HOUR: i64 = 3_600_000;

    #[test]
    fn test_hourly_into_four_hour() {
        let hourly: Vec<Bar> = (0..6)
            .map(|h| {
                let base = 100.0 + h as f64;
                Bar::new(h * HOUR, base, base + 2.0, base - 1.0, base + 0.5, 10.0)
            })
            .collect();

        let bars = resample(&hourly, Timeframe::Hour4);
        assert_eq!(bars.len(), 2);

        let first = bars[0];
        assert_eq!(first.timestamp, 0);
        assert_eq!(first.open, 100.0);
        assert_eq!(first.high, 105.0);
        assert_eq!(first.low, 99.0);
        assert_eq!(first.close, 103.5);
        assert_eq!(first.volume, 40.0);

        let second = bars[1];
        assert_eq!(second.timestamp, 4 * HOUR);
        assert_eq!(second.open, 104.0);
        assert_eq!(second.close, 105.5);
        assert_eq!(second.volume, 20.0);
    }

    #[test]
    fn test_session_offset_buckets() {
        // 13:30 and 14:30 fall in the 12:00 bucket, 16:30 in the 16:00 one
        let bars = vec![
            Bar::new(13 * HOUR + HOUR / 2, 1.0, 1.0, 1.0, 1.0, 1.0),
            Bar::new(14 * HOUR + HOUR / 2, 2.0, 2.0, 2.0, 2.0, 1.0),
            Bar::new(16 * HOUR + HOUR / 2, 3.0, 3.0, 3.0, 3.0, 1.0),
        ];

        let out = resample(&bars, Timeframe::Hour4);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].timestamp, 12 * HOUR);
        assert_eq!(out[1].timestamp, 16 * HOUR);
    }

    #[test]
    fn test_empty_input() {
        assert!(resample(&[], Timeframe::Hour4).is_empty());
    }
}
