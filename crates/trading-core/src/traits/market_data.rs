//! Market data and fundamental source traits.

use crate::error::DataError;
use crate::types::{Bar, FundamentalData, Timeframe};
use async_trait::async_trait;

/// Source of historical OHLCV bars.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Fetch the most recent `count` bars for a symbol.
    ///
    /// # Returns
    /// Bars ordered from oldest to newest with unique timestamps. May hold
    /// fewer than `count` bars when the provider has less history, but never
    /// zero: an empty result is reported as `DataError::NoDataAvailable`.
    async fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, DataError>;

    /// Get the provider name.
    fn name(&self) -> &str;
}

/// Source of fundamental news context. Cannot fail.
#[async_trait]
pub trait FundamentalSource: Send + Sync {
    async fn analysis(&self, symbol: &str) -> FundamentalData;
}
