//! Error types for the pipeline.

use rust_decimal::Decimal;
use thiserror::Error;

/// Top-level pipeline error.
#[derive(Error, Debug)]
pub enum TradingError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),

    #[error("Indicator error: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    #[error("Broker error: {0}")]
    Broker(#[from] BrokerError),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Market data provider errors.
#[derive(Error, Debug)]
pub enum DataError {
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    #[error("No data available for {symbol}")]
    NoDataAvailable { symbol: String },

    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Data source error: {0}")]
    Internal(String),
}

/// Indicator calculation errors.
#[derive(Error, Debug)]
pub enum IndicatorError {
    #[error("Insufficient data: need more than {required} bars, have {available}")]
    InsufficientData { required: usize, available: usize },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Chart rendering errors.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Nothing to render: bar table is empty")]
    EmptySeries,

    #[error("Drawing backend error: {0}")]
    Backend(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Vision analysis errors.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Could not read chart image: {0}")]
    Image(#[from] std::io::Error),

    #[error("Request failed: {0}")]
    Request(String),

    #[error("API returned {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Response contained no message content")]
    EmptyResponse,

    #[error("Response is not valid JSON: {0}")]
    MalformedJson(String),

    #[error("Response does not match the analysis schema: {0}")]
    InvalidSchema(String),
}

/// Broker / execution errors.
#[derive(Error, Debug)]
pub enum BrokerError {
    #[error("Execution failed: {0}")]
    ExecutionFailed(String),
}

/// Reasons a signal could not be turned into trade parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SizingError {
    #[error("HOLD signals are not tradable")]
    NotTradable,

    #[error("Reference price {0} is not a valid price")]
    InvalidPrice(f64),

    #[error("Analysis has malformed support/resistance data: {0}")]
    MalformedLevels(String),

    #[error("No valid support level below {price}")]
    NoSupportBelow { price: Decimal },

    #[error("No valid resistance level above {price}")]
    NoResistanceAbove { price: Decimal },

    #[error("Risk distance must be positive, got {0}")]
    NonPositiveRisk(Decimal),

    #[error("Position size rounds to zero shares")]
    PositionTooSmall,
}
