//! Chart renderer trait.

use crate::error::RenderError;
use crate::types::{AugmentedBar, ChartRequest, RenderedChart};

/// Draws an indicator-augmented bar table into an image file.
pub trait ChartRenderer: Send + Sync {
    /// Render `bars` to `request.output_path`, creating parent directories.
    fn render(
        &self,
        bars: &[AugmentedBar],
        request: &ChartRequest,
    ) -> Result<RenderedChart, RenderError>;
}
