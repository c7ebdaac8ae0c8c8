//! Core data types for the pipeline.

mod analysis;
mod chart;
mod fundamental;
mod indicator;
mod ohlcv;
mod order;
mod signal;
mod timeframe;

pub use analysis::{
    ChartAnalysis, IndicatorAssessment, PatternFinding, PriceLevel, RsiAssessment,
    SentimentVerdict, StatusNote, SupportResistance, TrendAssessment,
};
pub use chart::{ChartRequest, ChartSettings, RenderedChart};
pub use fundamental::FundamentalData;
pub use indicator::{AugmentedBar, BollingerOutput, IndicatorConfig, MacdOutput};
pub use ohlcv::Bar;
pub use order::{Confirmation, FillStatus, Side, TradeParameters};
pub use signal::{Decision, SignalType};
pub use timeframe::Timeframe;
