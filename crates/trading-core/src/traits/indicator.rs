//! Indicator trait definitions.

/// Single-series technical indicator.
///
/// `calculate` returns only the defined values, aligned to the end of the
/// input: the last output belongs to the last input. Callers align the
/// result to bar indices with `data.len() - output.len()`.
pub trait Indicator: Send + Sync {
    /// The output type of the indicator.
    type Output;

    /// Calculate indicator values for the given data.
    fn calculate(&self, data: &[f64]) -> Vec<Self::Output>;

    /// Get the minimum data points required for one output.
    fn period(&self) -> usize;

    /// Get the name of the indicator.
    fn name(&self) -> &str;
}

/// Indicator producing several related lines per input (MACD, Bollinger).
pub trait MultiOutputIndicator: Send + Sync {
    /// The output type containing multiple values.
    type Outputs;

    /// Calculate indicator values, trailing-aligned like [`Indicator`].
    fn calculate(&self, data: &[f64]) -> Vec<Self::Outputs>;

    fn period(&self) -> usize;

    fn name(&self) -> &str;
}
