//! Chart rendering.
//!
//! [`PlottersRenderer`] turns an indicator-augmented bar table into a PNG
//! with candlesticks, moving averages and Bollinger Bands above volume, MACD
//! and RSI panels.

mod renderer;

pub use renderer::PlottersRenderer;
