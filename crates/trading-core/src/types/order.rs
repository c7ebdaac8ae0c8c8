//! Trade parameters and simulated fills.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

impl Side {
    /// Get the sign for price offsets (+1 for buy, -1 for sell).
    pub fn sign(&self) -> Decimal {
        match self {
            Side::Buy => Decimal::ONE,
            Side::Sell => -Decimal::ONE,
        }
    }
}

impl std::fmt::Display for Side {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Side::Buy => write!(f, "BUY"),
            Side::Sell => write!(f, "SELL"),
        }
    }
}

/// Sized trade ready for execution.
///
/// Only built when a stop exists on the protective side of the entry and the
/// risk distance is strictly positive. All amounts are rounded to cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TradeParameters {
    pub symbol: String,
    pub side: Side,
    pub entry_price: Decimal,
    pub stop_loss: Decimal,
    pub take_profit: Decimal,
    /// Position size in shares
    pub position_size: Decimal,
    /// Dollar amount at risk if the stop is hit
    pub risk_amount: Decimal,
}

/// Fill state reported by an executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FillStatus {
    Filled,
}

impl std::fmt::Display for FillStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FillStatus::Filled => write!(f, "FILLED"),
        }
    }
}

/// Execution receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Confirmation {
    pub order_id: Uuid,
    pub symbol: String,
    pub side: Side,
    pub status: FillStatus,
    pub fill_price: Decimal,
    pub quantity: Decimal,
    pub timestamp: DateTime<Utc>,
}

impl Confirmation {
    /// Immediate fill at the requested entry price.
    pub fn filled(params: &TradeParameters) -> Self {
        Self {
            order_id: Uuid::new_v4(),
            symbol: params.symbol.clone(),
            side: params.side,
            status: FillStatus::Filled,
            fill_price: params.entry_price,
            quantity: params.position_size,
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_side_sign() {
        assert_eq!(Side::Buy.sign(), dec!(1));
        assert_eq!(Side::Sell.sign(), dec!(-1));
    }

    #[test]
    fn test_filled_confirmation() {
        let params = TradeParameters {
            symbol: "AAPL".to_string(),
            side: Side::Buy,
            entry_price: dec!(100),
            stop_loss: dec!(95),
            take_profit: dec!(110),
            position_size: dec!(20),
            risk_amount: dec!(100),
        };

        let confirmation = Confirmation::filled(&params);
        assert_eq!(confirmation.status, FillStatus::Filled);
        assert_eq!(confirmation.fill_price, dec!(100));
        assert_eq!(confirmation.quantity, dec!(20));
        assert_eq!(confirmation.symbol, "AAPL");
    }
}
