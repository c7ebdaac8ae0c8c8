//! Multi-timeframe signal reconciliation.
//!
//! The daily chart sets the bias and the intraday chart must confirm it.
//! Only matching bullish or bearish verdicts produce a trade; everything else
//! holds.

use tracing::{debug, info};
use trading_core::types::{ChartAnalysis, Decision, FundamentalData, SignalType};

/// Combines the daily and intraday chart analyses into one decision.
#[derive(Debug, Clone, Copy, Default)]
pub struct SignalReconciler;

impl SignalReconciler {
    pub fn new() -> Self {
        Self
    }

    /// Decide BUY, SELL or HOLD for a symbol.
    ///
    /// Never fails: an incomplete analysis becomes a HOLD whose rationale
    /// names the missing field. The fundamental record is logged but does not
    /// influence the outcome.
    pub fn reconcile(
        &self,
        symbol: &str,
        daily: &ChartAnalysis,
        intraday: &ChartAnalysis,
        fundamental: &FundamentalData,
    ) -> Decision {
        debug!(
            "{} fundamental context: {} ({})",
            symbol, fundamental.headline, fundamental.interpretation
        );

        let decision = Self::decide(daily, intraday);
        info!(
            "{} reconciled to {}: {}",
            symbol, decision.signal, decision.rationale
        );
        decision
    }

    fn decide(daily: &ChartAnalysis, intraday: &ChartAnalysis) -> Decision {
        let Some(daily_sentiment) = daily.sentiment() else {
            return incomplete("daily technical_sentiment.sentiment");
        };
        let Some(intraday_sentiment) = intraday.sentiment() else {
            return incomplete("intraday technical_sentiment.sentiment");
        };

        let daily_lower = daily_sentiment.to_lowercase();
        let intraday_lower = intraday_sentiment.to_lowercase();

        let aligned = if daily_lower.contains("bullish") && intraday_lower.contains("bullish") {
            Some((SignalType::Buy, "bullish"))
        } else if daily_lower.contains("bearish") && intraday_lower.contains("bearish") {
            Some((SignalType::Sell, "bearish"))
        } else {
            None
        };

        match aligned {
            Some((signal, bias)) => match intraday.reasoning() {
                Some(reasoning) => Decision::new(
                    signal,
                    format!(
                        "Daily trend is {bias}. Intraday chart shows {bias} confirmation. Reason: {reasoning}"
                    ),
                ),
                None => incomplete("intraday technical_sentiment.reasoning"),
            },
            None => Decision::hold(format!(
                "HOLD: no alignment between timeframes (daily '{}', intraday '{}')",
                daily_sentiment, intraday_sentiment
            )),
        }
    }
}

fn incomplete(field: &str) -> Decision {
    Decision::hold(format!(
        "HOLD: could not determine signal, analysis is missing {}",
        field
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analysis(sentiment: Option<&str>, reasoning: Option<&str>) -> ChartAnalysis {
        ChartAnalysis::from_value(json!({
            "technical_sentiment": {"sentiment": sentiment, "reasoning": reasoning}
        }))
        .unwrap()
    }

    fn reconcile(daily: &ChartAnalysis, intraday: &ChartAnalysis) -> Decision {
        SignalReconciler::new().reconcile("AAPL", daily, intraday, &FundamentalData::default())
    }

    #[test]
    fn test_bullish_alignment_buys() {
        let decision = reconcile(
            &analysis(Some("Strong Bullish"), Some("Above all MAs")),
            &analysis(Some("bullish trend"), Some("Breakout retest held")),
        );

        assert_eq!(decision.signal, SignalType::Buy);
        assert!(decision.rationale.contains("Breakout retest held"));
        assert!(!decision.rationale.contains("Above all MAs"));
    }

    #[test]
    fn test_bearish_alignment_sells() {
        let decision = reconcile(
            &analysis(Some("Bearish Correction"), None),
            &analysis(Some("BEARISH"), Some("Lower highs")),
        );

        assert_eq!(decision.signal, SignalType::Sell);
        assert!(decision.rationale.contains("Lower highs"));
    }

    #[test]
    fn test_mismatch_holds() {
        let decision = reconcile(
            &analysis(Some("Bearish"), Some("x")),
            &analysis(Some("Neutral"), Some("y")),
        );

        assert_eq!(decision.signal, SignalType::Hold);
        assert!(decision.rationale.contains("no alignment between timeframes"));
    }

    #[test]
    fn test_missing_sentiment_holds() {
        let decision = reconcile(
            &ChartAnalysis::default(),
            &analysis(Some("Bullish"), Some("y")),
        );

        assert_eq!(decision.signal, SignalType::Hold);
        assert!(decision.rationale.contains("daily technical_sentiment.sentiment"));

        let decision = reconcile(&analysis(Some("Bullish"), None), &ChartAnalysis::default());
        assert!(decision.rationale.contains("intraday technical_sentiment.sentiment"));
    }

    #[test]
    fn test_missing_intraday_reasoning_holds() {
        let decision = reconcile(
            &analysis(Some("Bullish"), Some("x")),
            &analysis(Some("Bullish"), None),
        );

        assert_eq!(decision.signal, SignalType::Hold);
        assert!(decision.rationale.contains("reasoning"));
    }

    #[test]
    fn test_fundamentals_do_not_change_outcome() {
        let daily = analysis(Some("Bullish"), Some("x"));
        let intraday = analysis(Some("Bullish"), Some("y"));
        let reconciler = SignalReconciler::new();

        let bad_news = FundamentalData {
            headline: "Company files for bankruptcy".to_string(),
            impact_magnitude: "high".to_string(),
            ..FundamentalData::default()
        };

        assert_eq!(
            reconciler.reconcile("AAPL", &daily, &intraday, &bad_news),
            reconciler.reconcile("AAPL", &daily, &intraday, &FundamentalData::default())
        );
    }
}
