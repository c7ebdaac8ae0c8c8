//! Chart settings and render requests.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use super::{IndicatorConfig, Timeframe};

/// What to fetch and overlay for one chart timeframe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSettings {
    /// Bar resolution
    pub timeframe: Timeframe,
    /// Number of bars requested from the data provider
    pub num_points: usize,
    /// Indicator overlay parameters
    pub indicators: IndicatorConfig,
}

impl ChartSettings {
    /// Higher timeframe used to establish the bias.
    pub fn daily() -> Self {
        Self {
            timeframe: Timeframe::Daily,
            num_points: 200,
            indicators: IndicatorConfig::daily(),
        }
    }

    /// Lower timeframe used to confirm entries.
    pub fn intraday() -> Self {
        Self {
            timeframe: Timeframe::Hour4,
            num_points: 150,
            indicators: IndicatorConfig::intraday(),
        }
    }

    /// Build the render request for a symbol, writing into `chart_dir`.
    pub fn request_for(&self, symbol: &str, chart_dir: &Path) -> ChartRequest {
        ChartRequest {
            symbol: symbol.to_string(),
            title: format!("{} {} Chart", symbol, self.timeframe.label()),
            output_path: chart_dir.join(format!(
                "{}_{}_chart.png",
                symbol,
                self.timeframe.file_tag()
            )),
            indicators: self.indicators.clone(),
        }
    }
}

/// Everything the renderer needs besides the bars themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartRequest {
    pub symbol: String,
    pub title: String,
    pub output_path: PathBuf,
    pub indicators: IndicatorConfig,
}

/// A chart image written to disk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderedChart {
    pub path: PathBuf,
    /// Number of indicator rows drawn
    pub rows: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_naming() {
        let dir = Path::new("charts");

        let daily = ChartSettings::daily().request_for("AAPL", dir);
        assert_eq!(daily.title, "AAPL Daily Chart");
        assert_eq!(daily.output_path, PathBuf::from("charts/AAPL_1D_chart.png"));
        assert_eq!(daily.indicators.moving_averages, vec![20, 50, 200]);

        let intraday = ChartSettings::intraday().request_for("AAPL", dir);
        assert_eq!(intraday.title, "AAPL 4-Hour Chart");
        assert_eq!(intraday.output_path, PathBuf::from("charts/AAPL_4H_chart.png"));
        assert_eq!(intraday.indicators.moving_averages, vec![20, 50]);
    }
}
