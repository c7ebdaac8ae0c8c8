//! Trade executor trait.

use crate::error::BrokerError;
use crate::types::{Confirmation, TradeParameters};
use async_trait::async_trait;

/// Places (or simulates) a sized trade.
#[async_trait]
pub trait TradeExecutor: Send + Sync {
    /// Execute a trade.
    ///
    /// `None` means there is nothing to place; implementations log and
    /// return `Ok(None)`.
    async fn execute(
        &self,
        params: Option<&TradeParameters>,
    ) -> Result<Option<Confirmation>, BrokerError>;

    /// Get the executor name.
    fn name(&self) -> &str;
}
