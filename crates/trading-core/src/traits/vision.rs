//! Vision analysis trait.

use crate::error::AnalysisError;
use crate::types::ChartAnalysis;
use async_trait::async_trait;
use std::path::Path;

/// Turns a chart image into a structured analysis.
#[async_trait]
pub trait VisionAnalyzer: Send + Sync {
    async fn analyze_chart(&self, image_path: &Path) -> Result<ChartAnalysis, AnalysisError>;

    /// Model identifier used for logging.
    fn model(&self) -> &str;
}
