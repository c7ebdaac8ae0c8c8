//! Instruction text sent alongside every chart image.

/// Asks for a structured technical read of one chart, returned as bare JSON
/// matching [`trading_core::types::ChartAnalysis`].
pub const ANALYSIS_PROMPT: &str = r#"
Analyze the attached price chart for a trading decision. Be thorough and structured.

Instructions:
1. Candlestick patterns: find the most recent significant patterns (engulfing, hammer, doji, ...) and note where they occur.
2. Chart patterns: identify classical formations (head and shoulders, double top/bottom, triangles, channels).
3. Support and resistance: give key horizontal levels and trendlines as specific prices, with their strength.
4. Trend: state the primary direction (Uptrend, Downtrend, Sideways) from price action and the moving averages.
5. Indicators: read RSI, MACD and the Bollinger Bands for overbought/oversold conditions, crossovers and volatility.
6. Sentiment: finish with an overall technical sentiment (for example "Strong Bullish" or "Bearish Correction"), a confidence and a short reasoning.

Reply with valid JSON only, no text before or after it, using this shape:

{
  "candlestick_patterns": [{"pattern": "...", "location": "...", "implication": "...", "confidence": "..."}],
  "chart_patterns": [{"pattern": "...", "status": "...", "implication": "...", "confidence": "..."}],
  "support_resistance": {
    "support": [{"level": 180.50, "type": "horizontal", "strength": "strong"}],
    "resistance": [{"level": 195.00, "type": "horizontal", "strength": "moderate"}]
  },
  "trend_analysis": {"direction": "...", "strength": "...", "details": "..."},
  "indicator_analysis": {"rsi": {"value": 0, "status": "..."}, "macd": {"status": "..."}, "bollinger_bands": {"status": "..."}},
  "technical_sentiment": {"sentiment": "...", "confidence": "...", "reasoning": "..."}
}
"#;
