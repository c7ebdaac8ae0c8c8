//! Turns a directional signal into sized trade parameters.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use trading_core::error::SizingError;
use trading_core::types::{ChartAnalysis, SignalType, TradeParameters};

use crate::{LevelStopSelector, PositionSizer};

/// Account and risk parameters, read once at startup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskSettings {
    /// Account equity used for sizing
    pub account_equity: Decimal,
    /// Percent of equity risked per trade
    pub risk_per_trade_percent: Decimal,
    /// Take-profit distance as a multiple of the stop distance
    pub min_reward_to_risk: Decimal,
    /// Allow fractional share sizes (2 dp); whole shares otherwise
    pub fractional_shares: bool,
}

impl Default for RiskSettings {
    fn default() -> Self {
        Self {
            account_equity: dec!(10000),
            risk_per_trade_percent: dec!(1.0),
            min_reward_to_risk: dec!(2.0),
            fractional_shares: true,
        }
    }
}

impl RiskSettings {
    pub fn validate(&self) -> Result<(), String> {
        if self.account_equity <= Decimal::ZERO {
            return Err("account_equity must be positive".into());
        }
        if self.risk_per_trade_percent <= Decimal::ZERO || self.risk_per_trade_percent > dec!(100)
        {
            return Err("risk_per_trade_percent must be in (0, 100]".into());
        }
        if self.min_reward_to_risk <= Decimal::ZERO {
            return Err("min_reward_to_risk must be positive".into());
        }
        Ok(())
    }
}

/// Sizes trades from the intraday support/resistance levels.
#[derive(Debug, Clone)]
pub struct RiskManager {
    settings: RiskSettings,
    stop_selector: LevelStopSelector,
    position_sizer: PositionSizer,
}

impl RiskManager {
    /// Create a new risk manager.
    pub fn new(settings: RiskSettings) -> Self {
        let position_sizer =
            PositionSizer::new(settings.account_equity, settings.risk_per_trade_percent)
                .with_fractional_shares(settings.fractional_shares);

        Self {
            settings,
            stop_selector: LevelStopSelector::new(),
            position_sizer,
        }
    }

    pub fn settings(&self) -> &RiskSettings {
        &self.settings
    }

    /// Compute entry, stop, target and size for a BUY or SELL signal.
    ///
    /// Every rejection is a [`SizingError`] value; the caller decides
    /// whether to log and skip.
    pub fn size(
        &self,
        symbol: &str,
        signal: SignalType,
        reference_price: f64,
        intraday: &ChartAnalysis,
    ) -> Result<TradeParameters, SizingError> {
        let result = self.try_size(symbol, signal, reference_price, intraday);
        match &result {
            Ok(params) => info!(
                "{} {} sized: {} shares @ {} (stop {}, target {}, risk ${})",
                symbol,
                params.side,
                params.position_size,
                params.entry_price,
                params.stop_loss,
                params.take_profit,
                params.risk_amount
            ),
            Err(e) => warn!("{} {} not sized: {}", symbol, signal, e),
        }
        result
    }

    fn try_size(
        &self,
        symbol: &str,
        signal: SignalType,
        reference_price: f64,
        intraday: &ChartAnalysis,
    ) -> Result<TradeParameters, SizingError> {
        let side = signal.side().ok_or(SizingError::NotTradable)?;

        let entry = Some(reference_price)
            .filter(|p| p.is_finite() && *p > 0.0)
            .and_then(|p| Decimal::try_from(p).ok())
            .ok_or(SizingError::InvalidPrice(reference_price))?;

        let stop = self.stop_selector.select(side, entry, intraday)?;
        let risk_per_share = (entry - stop).abs();
        if risk_per_share <= Decimal::ZERO {
            return Err(SizingError::NonPositiveRisk(risk_per_share));
        }

        let target = entry + side.sign() * risk_per_share * self.settings.min_reward_to_risk;
        let size = self.position_sizer.calculate(risk_per_share)?;

        Ok(TradeParameters {
            symbol: symbol.to_string(),
            side,
            entry_price: entry.round_dp(2),
            stop_loss: stop.round_dp(2),
            take_profit: target.round_dp(2),
            position_size: size.shares,
            risk_amount: size.risk_amount,
        })
    }
}
