//! Structured chart analysis returned by a vision model.
//!
//! The payload is untrusted. Every field is optional, numbers may arrive as
//! strings and text may arrive as numbers. A section that cannot be read is
//! dropped and recorded in [`ChartAnalysis::issues`] instead of failing the
//! whole document.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

use crate::error::AnalysisError;

/// Accept a number, a numeric string, or null.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s
            .trim()
            .trim_start_matches('$')
            .replace(',', "")
            .parse::<f64>()
            .ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

/// Accept a string, a number or a bool rendered as text, or null.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        Some(Value::Bool(b)) => Some(b.to_string()),
        _ => None,
    })
}

/// A candlestick or chart pattern spotted on the image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PatternFinding {
    #[serde(deserialize_with = "lenient_text")]
    pub pattern: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub location: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub implication: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub confidence: Option<String>,
}

/// One support or resistance level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PriceLevel {
    #[serde(deserialize_with = "lenient_number")]
    pub level: Option<f64>,
    #[serde(rename = "type", deserialize_with = "lenient_text")]
    pub kind: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub strength: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupportResistance {
    pub support: Option<Vec<PriceLevel>>,
    pub resistance: Option<Vec<PriceLevel>>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrendAssessment {
    #[serde(deserialize_with = "lenient_text")]
    pub direction: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub strength: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub details: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RsiAssessment {
    #[serde(deserialize_with = "lenient_number")]
    pub value: Option<f64>,
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusNote {
    #[serde(deserialize_with = "lenient_text")]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorAssessment {
    pub rsi: Option<RsiAssessment>,
    pub macd: Option<StatusNote>,
    pub bollinger_bands: Option<StatusNote>,
}

/// Overall technical verdict for one chart.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SentimentVerdict {
    #[serde(deserialize_with = "lenient_text")]
    pub sentiment: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub confidence: Option<String>,
    #[serde(deserialize_with = "lenient_text")]
    pub reasoning: Option<String>,
}

/// Validated analysis of one chart image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartAnalysis {
    pub candlestick_patterns: Vec<PatternFinding>,
    pub chart_patterns: Vec<PatternFinding>,
    pub support_resistance: Option<SupportResistance>,
    pub trend_analysis: Option<TrendAssessment>,
    pub indicator_analysis: Option<IndicatorAssessment>,
    pub technical_sentiment: Option<SentimentVerdict>,
    /// Sections that were present but unreadable
    #[serde(skip)]
    pub issues: Vec<String>,
}

impl ChartAnalysis {
    /// Validate a parsed JSON document.
    ///
    /// Fails only when the document is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, AnalysisError> {
        let obj = match value {
            Value::Object(obj) => obj,
            other => {
                return Err(AnalysisError::InvalidSchema(format!(
                    "expected a JSON object, got {}",
                    json_kind(&other)
                )))
            }
        };

        let mut issues = Vec::new();
        let candlestick_patterns = section(&obj, "candlestick_patterns", &mut issues);
        let chart_patterns = section(&obj, "chart_patterns", &mut issues);
        let support_resistance = section(&obj, "support_resistance", &mut issues);
        let trend_analysis = section(&obj, "trend_analysis", &mut issues);
        let indicator_analysis = section(&obj, "indicator_analysis", &mut issues);
        let technical_sentiment = section(&obj, "technical_sentiment", &mut issues);

        Ok(Self {
            candlestick_patterns: candlestick_patterns.unwrap_or_default(),
            chart_patterns: chart_patterns.unwrap_or_default(),
            support_resistance,
            trend_analysis,
            indicator_analysis,
            technical_sentiment,
            issues,
        })
    }

    pub fn sentiment(&self) -> Option<&str> {
        self.technical_sentiment
            .as_ref()
            .and_then(|s| s.sentiment.as_deref())
    }

    pub fn reasoning(&self) -> Option<&str> {
        self.technical_sentiment
            .as_ref()
            .and_then(|s| s.reasoning.as_deref())
    }

    /// Support entries, `None` when the section or the list is missing.
    pub fn support_levels(&self) -> Option<&[PriceLevel]> {
        self.support_resistance
            .as_ref()
            .and_then(|sr| sr.support.as_deref())
    }

    /// Resistance entries, `None` when the section or the list is missing.
    pub fn resistance_levels(&self) -> Option<&[PriceLevel]> {
        self.support_resistance
            .as_ref()
            .and_then(|sr| sr.resistance.as_deref())
    }
}

fn section<T: DeserializeOwned>(
    obj: &Map<String, Value>,
    key: &str,
    issues: &mut Vec<String>,
) -> Option<T> {
    match obj.get(key) {
        None | Some(Value::Null) => None,
        Some(value) => match T::deserialize(value.clone()) {
            Ok(parsed) => Some(parsed),
            Err(e) => {
                issues.push(format!("{}: {}", key, e));
                None
            }
        },
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
