//! Fundamental news record.

use serde::{Deserialize, Serialize};

/// A summarized piece of fundamental context for a symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FundamentalData {
    pub headline: String,
    pub source: String,
    pub impact_magnitude: String,
    pub interpretation: String,
}

impl Default for FundamentalData {
    fn default() -> Self {
        Self {
            headline: "Broader market sentiment remains cautious ahead of CPI data.".to_string(),
            source: "Simulated News API".to_string(),
            impact_magnitude: "medium".to_string(),
            interpretation: "General market sentiment can influence individual stocks."
                .to_string(),
        }
    }
}
