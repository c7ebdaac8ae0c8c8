//! Augments a bar table with every configured indicator.

use trading_core::error::IndicatorError;
use trading_core::traits::{Indicator, MultiOutputIndicator};
use trading_core::types::{AugmentedBar, Bar, IndicatorConfig};

use crate::momentum::{Macd, Rsi};
use crate::moving_average::Sma;
use crate::volatility::BollingerBands;

/// Computes moving averages, RSI, MACD and Bollinger Bands over closes and
/// keeps only the rows where all of them are defined.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndicatorEngine;

impl IndicatorEngine {
    /// Compute indicators for an ascending bar sequence.
    ///
    /// The result has `bars.len() - config.warmup_period()` rows, each
    /// carrying the bar it was computed for.
    pub fn compute(
        bars: &[Bar],
        config: &IndicatorConfig,
    ) -> Result<Vec<AugmentedBar>, IndicatorError> {
        config.validate()?;

        let warmup = config.warmup_period();
        if bars.len() <= warmup {
            return Err(IndicatorError::InsufficientData {
                required: warmup,
                available: bars.len(),
            });
        }

        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();

        let moving_averages: Vec<Vec<f64>> = config
            .moving_averages
            .iter()
            .map(|&window| Sma::new(window).calculate(&closes))
            .collect();
        let rsi = Rsi::new(config.rsi_period).calculate(&closes);
        let macd = Macd::with_periods(config.macd_fast, config.macd_slow, config.macd_signal)
            .calculate(&closes);
        let bollinger = BollingerBands::with_params(config.bollinger_period, config.bollinger_dev)
            .calculate(&closes);

        let n = bars.len();
        let at = |series_len: usize, i: usize| i - (n - series_len);

        let rows = (warmup..n)
            .map(|i| AugmentedBar {
                bar: bars[i],
                moving_averages: moving_averages
                    .iter()
                    .map(|series| series[at(series.len(), i)])
                    .collect(),
                rsi: rsi[at(rsi.len(), i)],
                macd: macd[at(macd.len(), i)],
                bollinger: bollinger[at(bollinger.len(), i)],
            })
            .collect();

        Ok(rows)
    }
}
