//! Technical indicators for chart overlays.
//!
//! - Moving averages (SMA, EMA)
//! - Momentum indicators (RSI, MACD)
//! - Volatility indicators (Standard Deviation, Bollinger Bands)
//!
//! [`IndicatorEngine`] combines them into an indicator-augmented bar table
//! ready for rendering.

pub mod engine;
pub mod momentum;
pub mod moving_average;
pub mod volatility;

pub use engine::IndicatorEngine;
pub use momentum::{Macd, Rsi};
pub use moving_average::{Ema, Sma};
pub use volatility::{BollingerBands, StdDev};
pub use trading_core::types::{AugmentedBar, BollingerOutput, IndicatorConfig, MacdOutput};
