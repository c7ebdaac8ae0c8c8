//! Yahoo Finance market data provider.
//!
//! Reads bars from the public v8 chart API. Intervals Yahoo does not serve
//! directly (4h) are built by fetching hourly bars and resampling.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};
use trading_core::error::DataError;
use trading_core::traits::MarketDataProvider;
use trading_core::types::{Bar, Timeframe};

use crate::resample::resample;

const DEFAULT_BASE_URL: &str = "https://query2.finance.yahoo.com";
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartResult,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    result: Option<Vec<ChartData>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartData {
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteData>,
}

#[derive(Debug, Deserialize)]
struct QuoteData {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

/// Query parameters for one timeframe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct FetchPlan {
    pub interval: &'static str,
    pub range: String,
    /// Set when the fetched interval must be aggregated afterwards
    pub resample_to: Option<Timeframe>,
}

impl FetchPlan {
    pub(crate) fn for_timeframe(timeframe: Timeframe, count: usize) -> Self {
        let (interval, range, resample_to) = match timeframe {
            Timeframe::Daily => ("1d", format!("{}d", (count * 3).div_ceil(2)), None),
            Timeframe::Weekly => ("1wk", format!("{}d", (count * 7 * 3).div_ceil(2)), None),
            Timeframe::Hour1 => ("1h", "720d".to_string(), None),
            Timeframe::Hour4 => ("1h", "720d".to_string(), Some(Timeframe::Hour4)),
            Timeframe::Minute1 => ("1m", "7d".to_string(), None),
            Timeframe::Minute5 => ("5m", "60d".to_string(), None),
            Timeframe::Minute15 => ("15m", "60d".to_string(), None),
            Timeframe::Minute30 => ("30m", "60d".to_string(), None),
        };
        Self {
            interval,
            range,
            resample_to,
        }
    }
}

/// Market data from Yahoo's chart API.
pub struct YahooProvider {
    client: Client,
    base_url: String,
}

impl YahooProvider {
    /// Create a provider. Requests wait indefinitely unless a timeout is set.
    pub fn new(timeout: Option<Duration>) -> Result<Self, DataError> {
        let mut builder = Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        Ok(Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different host (mirrors, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn chart_url(&self, symbol: &str, plan: &FetchPlan) -> String {
        format!(
            "{}/v8/finance/chart/{}?range={}&interval={}",
            self.base_url, symbol, plan.range, plan.interval
        )
    }

    /// Convert a chart API response into ascending bars. Rows with any
    /// missing price are skipped; a missing volume counts as zero.
    fn parse_response(symbol: &str, resp: ChartResponse) -> Result<Vec<Bar>, DataError> {
        let result = match resp.chart.result {
            Some(result) => result,
            None => {
                return Err(match resp.chart.error {
                    Some(err) if err.code == "Not Found" => {
                        DataError::SymbolNotFound(symbol.to_string())
                    }
                    Some(err) => DataError::ApiError(format!("{}: {}", err.code, err.description)),
                    None => DataError::ParseError("empty result with no error".into()),
                })
            }
        };

        let data = result
            .into_iter()
            .next()
            .ok_or_else(|| DataError::NoDataAvailable {
                symbol: symbol.to_string(),
            })?;

        // Symbols without trades in the range come back without timestamps.
        let timestamps = data.timestamp.unwrap_or_default();
        let quote = match data.indicators.quote.into_iter().next() {
            Some(quote) => quote,
            None if timestamps.is_empty() => return Ok(Vec::new()),
            None => return Err(DataError::ParseError("no quote data".into())),
        };

        let value = |series: &[Option<f64>], i: usize| series.get(i).copied().flatten();

        let bars = timestamps
            .iter()
            .enumerate()
            .filter_map(|(i, &ts)| {
                Some(Bar::new(
                    ts * 1000,
                    value(&quote.open, i)?,
                    value(&quote.high, i)?,
                    value(&quote.low, i)?,
                    value(&quote.close, i)?,
                    value(&quote.volume, i).unwrap_or(0.0),
                ))
            })
            .collect();

        Ok(Bar::normalize(bars))
    }
}

#[async_trait]
impl MarketDataProvider for YahooProvider {
    async fn fetch_bars(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        count: usize,
    ) -> Result<Vec<Bar>, DataError> {
        let plan = FetchPlan::for_timeframe(timeframe, count);
        let url = self.chart_url(symbol, &plan);
        debug!("GET {}", url);

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DataError::ConnectionError(e.to_string()))?;

        let status = resp.status();
        if status == StatusCode::NOT_FOUND {
            return Err(DataError::SymbolNotFound(symbol.to_string()));
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DataError::ApiError(format!("HTTP {}: {}", status, body)));
        }

        let chart: ChartResponse = resp
            .json()
            .await
            .map_err(|e| DataError::ParseError(e.to_string()))?;

        let mut bars = Self::parse_response(symbol, chart)?;
        if let Some(target) = plan.resample_to {
            bars = resample(&bars, target);
        }
        let bars = Bar::tail(bars, count);

        if bars.is_empty() {
            return Err(DataError::NoDataAvailable {
                symbol: symbol.to_string(),
            });
        }

        info!(
            "Fetched {} {} bars for {} from Yahoo ({} / {})",
            bars.len(),
            timeframe,
            symbol,
            plan.interval,
            plan.range
        );
        Ok(bars)
    }

    fn name(&self) -> &str {
        "yahoo"
    }
}
