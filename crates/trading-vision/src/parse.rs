//! Turning model text into a validated [`ChartAnalysis`].

use trading_core::error::AnalysisError;
use trading_core::types::ChartAnalysis;

/// Remove a surrounding Markdown code fence, with or without a language tag.
///
/// Text without a leading fence is returned trimmed but otherwise unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };

    // Drop the info string ("json", "JSON", ...) up to the first newline.
    let body = match rest.find('\n') {
        Some(pos) => &rest[pos + 1..],
        None => rest.trim_start_matches(|c: char| c.is_ascii_alphabetic()),
    };

    body.trim_end().trim_end_matches("```").trim()
}

/// Parse the model's reply into a [`ChartAnalysis`].
pub fn parse_analysis(text: &str) -> Result<ChartAnalysis, AnalysisError> {
    let body = strip_code_fence(text);
    if body.is_empty() {
        return Err(AnalysisError::EmptyResponse);
    }

    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| AnalysisError::MalformedJson(e.to_string()))?;
    ChartAnalysis::from_value(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fence() {
        assert_eq!(strip_code_fence("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("```\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fence("  ```JSON\n{}\n```  \n"), "{}");
        assert_eq!(strip_code_fence("```json {\"a\":1}```"), "{\"a\":1}");
        assert_eq!(strip_code_fence(" {\"a\":1} "), "{\"a\":1}");
    }

    #[test]
    fn test_fenced_reply_parses() {
        let reply = "```json\n{\"technical_sentiment\": {\"sentiment\": \"Bullish\", \"reasoning\": \"Higher lows\"}}\n```";

        let analysis = parse_analysis(reply).unwrap();
        assert_eq!(analysis.sentiment(), Some("Bullish"));
        assert_eq!(analysis.reasoning(), Some("Higher lows"));
    }

    #[test]
    fn test_malformed_json() {
        let err = parse_analysis("The chart looks bullish overall.").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedJson(_)));

        let err = parse_analysis("```json\n{\"technical_sentiment\": \n```").unwrap_err();
        assert!(matches!(err, AnalysisError::MalformedJson(_)));
    }

    #[test]
    fn test_not_an_object() {
        let err = parse_analysis("[\"bullish\"]").unwrap_err();
        assert!(matches!(err, AnalysisError::InvalidSchema(_)));
    }

    #[test]
    fn test_empty_reply() {
        assert!(matches!(
            parse_analysis("```json\n```"),
            Err(AnalysisError::EmptyResponse)
        ));
    }
}
