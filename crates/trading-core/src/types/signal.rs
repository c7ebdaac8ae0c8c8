//! Trading signals and reconciled decisions.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Side;

/// Final action for a symbol after reconciling timeframes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalType {
    Buy,
    Sell,
    Hold,
}

impl SignalType {
    /// Order side for tradable signals, `None` for HOLD.
    pub fn side(&self) -> Option<Side> {
        match self {
            SignalType::Buy => Some(Side::Buy),
            SignalType::Sell => Some(Side::Sell),
            SignalType::Hold => None,
        }
    }

    pub fn is_actionable(&self) -> bool {
        self.side().is_some()
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignalType::Buy => write!(f, "BUY"),
            SignalType::Sell => write!(f, "SELL"),
            SignalType::Hold => write!(f, "HOLD"),
        }
    }
}

/// A signal together with the reasoning that produced it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decision {
    pub signal: SignalType,
    pub rationale: String,
}

impl Decision {
    pub fn new(signal: SignalType, rationale: impl Into<String>) -> Self {
        Self {
            signal,
            rationale: rationale.into(),
        }
    }

    pub fn hold(rationale: impl Into<String>) -> Self {
        Self::new(SignalType::Hold, rationale)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_signal_sides() {
        assert_eq!(SignalType::Buy.side(), Some(Side::Buy));
        assert_eq!(SignalType::Sell.side(), Some(Side::Sell));
        assert_eq!(SignalType::Hold.side(), None);
        assert!(!SignalType::Hold.is_actionable());
    }

    #[test]
    fn test_signal_serde() {
        assert_eq!(serde_json::to_string(&SignalType::Buy).unwrap(), "\"BUY\"");
        assert_eq!(SignalType::Hold.to_string(), "HOLD");
    }
}
