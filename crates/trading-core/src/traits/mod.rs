//! Collaborator traits for the pipeline.

mod executor;
mod indicator;
mod market_data;
mod renderer;
mod vision;

pub use executor::TradeExecutor;
pub use indicator::{Indicator, MultiOutputIndicator};
pub use market_data::{FundamentalSource, MarketDataProvider};
pub use renderer::ChartRenderer;
pub use vision::VisionAnalyzer;
