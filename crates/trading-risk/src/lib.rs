//! Risk management for chart-driven trades.
//!
//! Provides stop selection from support/resistance levels, fixed-fractional
//! position sizing and the [`RiskManager`] that combines them.

mod position_sizer;
mod risk_manager;
mod stop_loss;

pub use position_sizer::{PositionSize, PositionSizer};
pub use risk_manager::{RiskManager, RiskSettings};
pub use stop_loss::LevelStopSelector;
