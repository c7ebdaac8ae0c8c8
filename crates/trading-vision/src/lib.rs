//! Chart analysis through a vision language model.
//!
//! [`OpenAiVisionAnalyzer`] sends a rendered chart with [`ANALYSIS_PROMPT`]
//! to a chat-completions endpoint and validates the JSON reply into a
//! [`trading_core::types::ChartAnalysis`].

mod openai;
mod parse;
mod prompt;

pub use openai::{OpenAiConfig, OpenAiVisionAnalyzer};
pub use parse::{parse_analysis, strip_code_fence};
pub use prompt::ANALYSIS_PROMPT;
