//! Static fundamental analyzer.

use async_trait::async_trait;
use tracing::info;
use trading_core::traits::FundamentalSource;
use trading_core::types::FundamentalData;

/// Returns the same configured news record for every symbol.
#[derive(Debug, Clone, Default)]
pub struct MockFundamentalAnalyzer {
    record: FundamentalData,
}

impl MockFundamentalAnalyzer {
    pub fn new(record: FundamentalData) -> Self {
        Self { record }
    }
}

#[async_trait]
impl FundamentalSource for MockFundamentalAnalyzer {
    async fn analysis(&self, symbol: &str) -> FundamentalData {
        info!(
            "Fundamental context for {}: {} ({}, impact {})",
            symbol, self.record.headline, self.record.source, self.record.impact_magnitude
        );
        self.record.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_same_record_for_any_symbol() {
        let analyzer = MockFundamentalAnalyzer::default();

        let aapl = analyzer.analysis("AAPL").await;
        let msft = analyzer.analysis("MSFT").await;

        assert_eq!(aapl, msft);
        assert_eq!(aapl.source, "Simulated News API");
        assert_eq!(aapl.impact_magnitude, "medium");
    }

    #[tokio::test]
    async fn test_configured_record() {
        let record = FundamentalData {
            headline: "Earnings beat".to_string(),
            ..FundamentalData::default()
        };
        let analyzer = MockFundamentalAnalyzer::new(record.clone());

        assert_eq!(analyzer.analysis("TSLA").await, record);
    }
}
