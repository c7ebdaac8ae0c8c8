//! CSV directory market data provider.

use async_trait::async_trait;
use chrono::{NaiveDate, NaiveDateTime};
use csv::ReaderBuilder;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use trading_core::error::DataError;
use trading_core::traits::MarketDataProvider;
use trading_core::types::{Bar, Timeframe};

use crate::resample::resample;

/// CSV record format. Extra columns such as "Adj Close" are ignored.
#[derive(Debug, Deserialize)]
struct CsvRecord {
    #[serde(
        alias = "Date",
        alias = "Datetime",
        alias = "datetime",
        alias = "timestamp",
        alias = "Timestamp"
    )]
    date: String,
    #[serde(alias = "Open")]
    open: f64,
    #[serde(alias = "High")]
    high: f64,
    #[serde(alias = "Low")]
    low: f64,
    #[serde(alias = "Close")]
    close: f64,
    #[serde(alias = "Volume", default)]
    volume: f64,
}

/// Reads bars from `{dir}/{SYMBOL}_{timeframe}.csv`, falling back to
/// `{dir}/{SYMBOL}.csv`. A 4h request with only an hourly file available is
/// served by resampling `{SYMBOL}_1h.csv`.
pub struct CsvProvider {
    dir: PathBuf,
}

impl CsvProvider {
    /// Create a provider over an existing directory.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, DataError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(DataError::Internal(format!(
                "CSV data directory not found: {}",
                dir.display()
            )));
        }
        Ok(Self { dir })
    }

    /// Pick the file to read and whether it needs resampling.
    fn locate(&self, symbol: &str, timeframe: Timeframe) -> Option<(PathBuf, Option<Timeframe>)> {
        let exact = self.dir.join(format!("{}_{}.csv", symbol, timeframe));
        if exact.is_file() {
            return Some((exact, None));
        }

        if timeframe == Timeframe::Hour4 {
            let hourly = self.dir.join(format!("{}_{}.csv", symbol, Timeframe::Hour1));
            if hourly.is_file() {
                return Some((hourly, Some(Timeframe::Hour4)));
            }
        }

        let plain = self.dir.join(format!("{}.csv", symbol));
        plain.is_file().then_some((plain, None))
    }

    /// Load bars from a specific path.
    fn load_from_path(path: &Path) -> Result<Vec<Bar>, DataError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Vec::new();

        for result in reader.deserialize() {
            let record: CsvRecord = result.map_err(|e| DataError::ParseError(e.to_string()))?;

            bars.push(Bar::new(
                parse_timestamp(&record.date)?,
                record.open,
                record.high,
                record.low,
                record.close,
                record.volume,
            ));
        }

        Ok(Bar::normalize(bars))
    }
}

/// Parse various timestamp formats into Unix milliseconds.
fn parse_timestamp(date_str: &str) -> Result<i64, DataError> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(date_str) {
        return Ok(dt.timestamp_millis());
    }

    let datetime_formats = ["%Y-%m-%d %H:%M:%S", "%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S"];
    for format in datetime_formats {
        if let Ok(dt) = NaiveDateTime::parse_from_str(date_str, format) {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    let date_formats = ["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%m-%Y"];
    for format in date_formats {
        if let Some(dt) = NaiveDate::parse_from_str(date_str, format)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
        {
            return Ok(dt.and_utc().timestamp_millis());
        }
    }

    // Unix timestamp, milliseconds when longer than 10 digits
    if let Ok(ts) = date_str.parse::<i64>() {
        return Ok(if ts > 10_000_000_000 { ts } else { ts * 1000 });
    }

    Err(DataError::ParseError(format!(
        "Could not parse date: {}",
        date_str
    )))
}

#[async_trait]
impl MarketDataProvider for CsvProvider {
    async fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, DataError> {
        let (path, resample_to) = self
            .locate(symbol, timeframe)
            .ok_or_else(|| DataError::SymbolNotFound(symbol.to_string()))?;
        debug!("Reading {}", path.display());

        let mut bars = Self::load_from_path(&path)?;
        if let Some(target) = resample_to {
            bars = resample(&bars, target);
        }
        let bars = Bar::tail(bars, count);

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable {
                symbol: symbol.to_string(),
            });
        }

        info!(
            "Loaded {} {} bars for {} from {}",
            bars.len(),
            timeframe,
            symbol,
            path.display()
        );
        Ok(bars)
    }

    fn name(&self) -> &str {
        "csv"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, contents: &str) {
        fs::write(dir.path().join(name), contents).unwrap();
    }

    #[test]
    fn test_parse_timestamp() {
        assert_eq!(parse_timestamp("1970-01-02").unwrap(), 86_400_000);
        assert!(parse_timestamp("2024-01-15 10:30:00").is_ok());
        assert!(parse_timestamp("2024-01-15T10:30:00Z").is_ok());
        assert!(parse_timestamp("01/15/2024").is_ok());
        assert_eq!(parse_timestamp("1705312800000").unwrap(), 1_705_312_800_000);
        assert_eq!(parse_timestamp("1705312800").unwrap(), 1_705_312_800_000);
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[tokio::test]
    async fn test_fetch_keeps_last_count_in_order() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "AAPL_1d.csv",
            "Date,Open,High,Low,Close,Volume\n\
             2024-01-03,3,3,3,3,300\n\
             2024-01-01,1,1,1,1,100\n\
             2024-01-02,2,2,2,2,200\n\
             2024-01-02,2.5,2.5,2.5,2.5,250\n",
        );

        let provider = CsvProvider::new(dir.path()).unwrap();
        let bars = provider.fetch_bars("AAPL", Timeframe::Daily, 2).await.unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 2.5);
        assert_eq!(bars[1].close, 3.0);
    }

    #[tokio::test]
    async fn test_falls_back_to_plain_file() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "MSFT.csv",
            "date,open,high,low,close,volume\n2024-01-01,10,11,9,10.5,1000\n",
        );

        let provider = CsvProvider::new(dir.path()).unwrap();
        let bars = provider.fetch_bars("MSFT", Timeframe::Daily, 200).await.unwrap();
        assert_eq!(bars.len(), 1);
    }

    #[tokio::test]
    async fn test_adjusted_close_column_ignored() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "NVDA_1d.csv",
            "Date,Open,High,Low,Close,Adj Close,Volume\n2024-01-01,10,11,9,10.5,10.2,1000\n",
        );

        let provider = CsvProvider::new(dir.path()).unwrap();
        let bars = provider.fetch_bars("NVDA", Timeframe::Daily, 5).await.unwrap();
        assert_eq!(bars[0].close, 10.5);
    }

    #[tokio::test]
    async fn test_four_hour_from_hourly_file() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "AAPL_1h.csv",
            "Datetime,Open,High,Low,Close,Volume\n\
             2024-01-02 00:00:00,1,2,1,2,10\n\
             2024-01-02 01:00:00,2,3,2,3,10\n\
             2024-01-02 04:00:00,3,4,3,4,10\n",
        );

        let provider = CsvProvider::new(dir.path()).unwrap();
        let bars = provider.fetch_bars("AAPL", Timeframe::Hour4, 150).await.unwrap();

        assert_eq!(bars.len(), 2);
        assert_eq!(bars[0].close, 3.0);
        assert_eq!(bars[0].volume, 20.0);
    }

    #[tokio::test]
    async fn test_missing_symbol_and_empty_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "EMPTY.csv", "Date,Open,High,Low,Close,Volume\n");

        let provider = CsvProvider::new(dir.path()).unwrap();

        let missing = provider.fetch_bars("NOPE", Timeframe::Daily, 10).await;
        assert!(matches!(missing, Err(DataError::SymbolNotFound(_))));

        let empty = provider.fetch_bars("EMPTY", Timeframe::Daily, 10).await;
        assert!(matches!(empty, Err(DataError::NoDataAvailable { .. })));
    }

    #[test]
    fn test_missing_directory() {
        assert!(CsvProvider::new("/definitely/not/here").is_err());
    }
}
