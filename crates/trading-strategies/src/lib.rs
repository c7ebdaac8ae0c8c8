//! Trading decisions from chart analyses.
//!
//! [`SignalReconciler`] turns a daily and an intraday
//! [`trading_core::types::ChartAnalysis`] into a BUY, SELL or HOLD
//! [`trading_core::types::Decision`].

mod reconciler;

pub use reconciler::SignalReconciler;
