//! Market data providers and fundamental context.
//!
//! - [`YahooProvider`] reads the public Yahoo chart API
//! - [`CsvProvider`] reads exported OHLCV files from a directory
//! - [`MockFundamentalAnalyzer`] serves a static news record

mod csv_source;
mod fundamentals;
mod resample;
mod yahoo;

pub use csv_source::CsvProvider;
pub use fundamentals::MockFundamentalAnalyzer;
pub use resample::resample;
pub use yahoo::YahooProvider;

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use trading_core::error::DataError;
use trading_core::traits::MarketDataProvider;

/// Which market data backend to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataProviderKind {
    #[default]
    Yahoo,
    Csv,
}

impl std::fmt::Display for DataProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataProviderKind::Yahoo => write!(f, "yahoo"),
            DataProviderKind::Csv => write!(f, "csv"),
        }
    }
}

/// Build the configured provider.
///
/// `csv_dir` is only read for [`DataProviderKind::Csv`], `timeout` only for
/// network providers.
pub fn create_provider(
    kind: DataProviderKind,
    csv_dir: &Path,
    timeout: Option<Duration>,
) -> Result<Box<dyn MarketDataProvider>, DataError> {
    Ok(match kind {
        DataProviderKind::Yahoo => Box::new(YahooProvider::new(timeout)?),
        DataProviderKind::Csv => Box::new(CsvProvider::new(csv_dir)?),
    })
}
