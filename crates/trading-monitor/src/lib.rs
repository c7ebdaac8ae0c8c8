//! Logging for the pipeline: console output plus a plain log file.

mod logging;

pub use logging::{setup_logging, LoggingError};
pub use tracing_appender::non_blocking::WorkerGuard;
