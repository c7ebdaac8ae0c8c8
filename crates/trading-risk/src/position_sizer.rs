//! Fixed-fractional position sizing.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use trading_core::error::SizingError;

/// Result of sizing one trade.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PositionSize {
    /// Shares to trade
    pub shares: Decimal,
    /// Dollars lost if the stop is hit
    pub risk_amount: Decimal,
}

/// Sizes positions so that a stop-out loses a fixed share of equity.
#[derive(Debug, Clone)]
pub struct PositionSizer {
    account_equity: Decimal,
    risk_percent: Decimal,
    fractional_shares: bool,
}

impl PositionSizer {
    /// Create a new position sizer risking `risk_percent` of `account_equity`
    /// per trade.
    pub fn new(account_equity: Decimal, risk_percent: Decimal) -> Self {
        Self {
            account_equity,
            risk_percent,
            fractional_shares: true,
        }
    }

    /// Round sizes to 2 decimal places, or down to whole shares when false.
    pub fn with_fractional_shares(mut self, fractional: bool) -> Self {
        self.fractional_shares = fractional;
        self
    }

    /// Dollar amount risked per trade.
    pub fn risk_amount(&self) -> Decimal {
        self.account_equity * (self.risk_percent / dec!(100))
    }

    /// Size a position whose stop sits `risk_per_share` away from entry.
    pub fn calculate(&self, risk_per_share: Decimal) -> Result<PositionSize, SizingError> {
        if risk_per_share <= Decimal::ZERO {
            return Err(SizingError::NonPositiveRisk(risk_per_share));
        }

        let risk_amount = self.risk_amount();
        let raw = risk_amount / risk_per_share;
        let shares = if self.fractional_shares {
            raw.round_dp(2)
        } else {
            raw.round_dp_with_strategy(0, RoundingStrategy::ToZero)
        };

        if shares <= Decimal::ZERO {
            return Err(SizingError::PositionTooSmall);
        }

        Ok(PositionSize {
            shares,
            risk_amount: risk_amount.round_dp(2),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_percent_of_ten_thousand() {
        let sizer = PositionSizer::new(dec!(10000), dec!(1));
        let size = sizer.calculate(dec!(5)).unwrap();

        assert_eq!(size.shares, dec!(20));
        assert_eq!(size.risk_amount, dec!(100));
    }

    #[test]
    fn test_fractional_vs_whole_shares() {
        let sizer = PositionSizer::new(dec!(10000), dec!(1));

        // 100 / 3 = 33.333...
        assert_eq!(sizer.calculate(dec!(3)).unwrap().shares, dec!(33.33));
        assert_eq!(
            sizer.clone().with_fractional_shares(false).calculate(dec!(3)).unwrap().shares,
            dec!(33)
        );
    }

    #[test]
    fn test_non_positive_risk() {
        let sizer = PositionSizer::new(dec!(10000), dec!(1));

        assert_eq!(
            sizer.calculate(Decimal::ZERO),
            Err(SizingError::NonPositiveRisk(Decimal::ZERO))
        );
    }

    #[test]
    fn test_too_small() {
        // 1 dollar of risk against a 500 dollar stop distance
        let sizer = PositionSizer::new(dec!(100), dec!(1)).with_fractional_shares(false);
        assert_eq!(sizer.calculate(dec!(500)), Err(SizingError::PositionTooSmall));

        let fractional = PositionSizer::new(dec!(100), dec!(1));
        assert_eq!(
            fractional.calculate(dec!(50000)),
            Err(SizingError::PositionTooSmall)
        );
    }
}
