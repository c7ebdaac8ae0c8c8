//! Simulated execution that fills every order at its entry price.

use async_trait::async_trait;
use std::time::Duration;
use tracing::{info, warn};
use trading_core::error::BrokerError;
use trading_core::traits::TradeExecutor;
use trading_core::types::{Confirmation, TradeParameters};

/// Logs a trade ticket and reports an immediate fill.
#[derive(Debug, Clone)]
pub struct SimulatedExecutor {
    broker_name: String,
    latency: Duration,
}

impl SimulatedExecutor {
    /// Create a simulator with a one second cosmetic delay.
    pub fn new() -> Self {
        Self {
            broker_name: "Simulated Broker".to_string(),
            latency: Duration::from_secs(1),
        }
    }

    /// Set the delay between logging the ticket and reporting the fill.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Set the broker name shown on tickets.
    pub fn with_broker_name(mut self, name: impl Into<String>) -> Self {
        self.broker_name = name.into();
        self
    }
}

impl Default for SimulatedExecutor {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeExecutor for SimulatedExecutor {
    async fn execute(
        &self,
        params: Option<&TradeParameters>,
    ) -> Result<Option<Confirmation>, BrokerError> {
        let Some(params) = params else {
            warn!("No trade parameters provided, nothing to execute");
            return Ok(None);
        };

        if params.position_size <= rust_decimal::Decimal::ZERO {
            return Err(BrokerError::ExecutionFailed(format!(
                "{}: position size must be positive, got {}",
                params.symbol, params.position_size
            )));
        }

        info!(
            "[{}] {} {} x {} @ {} | stop {} | target {} | risk ${}",
            self.broker_name,
            params.side,
            params.symbol,
            params.position_size,
            params.entry_price,
            params.stop_loss,
            params.take_profit,
            params.risk_amount
        );

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let confirmation = Confirmation::filled(params);
        info!(
            "[{}] Order {} {} for {} at {}",
            self.broker_name,
            confirmation.order_id,
            confirmation.status,
            confirmation.symbol,
            confirmation.fill_price
        );

        Ok(Some(confirmation))
    }

    fn name(&self) -> &str {
        &self.broker_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use trading_core::types::{FillStatus, Side};

    fn params() -> TradeParameters {
        TradeParameters {
            symbol: "AAPL".to_string(),
            side: Side::Buy,
            entry_price: dec!(100),
            stop_loss: dec!(95),
            take_profit: dec!(110),
            position_size: dec!(20),
            risk_amount: dec!(100),
        }
    }

    #[tokio::test]
    async fn test_fills_at_entry_price() {
        let executor = SimulatedExecutor::new().with_latency(Duration::ZERO);
        let confirmation = executor.execute(Some(&params())).await.unwrap().unwrap();

        assert_eq!(confirmation.status, FillStatus::Filled);
        assert_eq!(confirmation.fill_price, dec!(100));
        assert_eq!(confirmation.quantity, dec!(20));
        assert_eq!(confirmation.side, Side::Buy);
    }

    #[tokio::test]
    async fn test_nothing_to_execute() {
        let executor = SimulatedExecutor::new().with_latency(Duration::ZERO);
        assert!(executor.execute(None).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_unique_order_ids() {
        let executor = SimulatedExecutor::new().with_latency(Duration::ZERO);
        let p = params();

        let a = executor.execute(Some(&p)).await.unwrap().unwrap();
        let b = executor.execute(Some(&p)).await.unwrap().unwrap();
        assert_ne!(a.order_id, b.order_id);
    }

    #[tokio::test(start_paused = true)]
    async fn test_latency_is_awaited() {
        let executor = SimulatedExecutor::new().with_latency(Duration::from_secs(1));
        let start = tokio::time::Instant::now();

        executor.execute(Some(&params())).await.unwrap();
        assert!(start.elapsed() >= Duration::from_secs(1));
    }

    #[tokio::test]
    async fn test_rejects_empty_position() {
        let executor = SimulatedExecutor::new().with_latency(Duration::ZERO);
        let mut p = params();
        p.position_size = dec!(0);

        assert!(matches!(
            executor.execute(Some(&p)).await,
            Err(BrokerError::ExecutionFailed(_))
        ));
    }
}
