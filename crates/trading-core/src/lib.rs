//! Core types and traits for the chart analysis pipeline.
//!
//! This crate provides the foundational building blocks including:
//! - Market data types (Bar, Timeframe) and indicator configuration
//! - The vision analysis schema (ChartAnalysis) and trading decisions
//! - Trade parameters and simulated fill confirmations
//! - Collaborator traits for data providers, renderers, analyzers and executors

pub mod types;
pub mod traits;
pub mod error;

pub use error::TradingError;
pub use types::*;
pub use traits::*;
