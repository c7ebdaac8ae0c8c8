//! Batch run report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::orchestrator::SymbolOutcome;

/// Outcome of one symbol's cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SymbolReport {
    pub symbol: String,
    #[serde(flatten)]
    pub outcome: SymbolOutcome,
}

/// Everything that happened during one run over the symbol list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    /// In processing order
    pub symbols: Vec<SymbolReport>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            symbols: Vec::new(),
        }
    }

    pub fn record(&mut self, symbol: &str, outcome: SymbolOutcome) {
        self.symbols.push(SymbolReport {
            symbol: symbol.to_string(),
            outcome,
        });
    }

    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    fn count(&self, pred: impl Fn(&SymbolOutcome) -> bool) -> usize {
        self.symbols.iter().filter(|s| pred(&s.outcome)).count()
    }

    pub fn executed(&self) -> usize {
        self.count(|o| matches!(o, SymbolOutcome::Executed { .. }))
    }

    pub fn held(&self) -> usize {
        self.count(|o| matches!(o, SymbolOutcome::Hold { .. }))
    }

    pub fn rejected(&self) -> usize {
        self.count(|o| matches!(o, SymbolOutcome::SizingRejected { .. }))
    }

    pub fn aborted(&self) -> usize {
        self.count(|o| matches!(o, SymbolOutcome::Aborted { .. }))
    }

    /// Generate a text summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();

        s.push_str("═══════════════════════════════════════════════════════════\n");
        s.push_str("                        RUN REPORT                          \n");
        s.push_str("═══════════════════════════════════════════════════════════\n\n");

        s.push_str("OVERVIEW\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        s.push_str(&format!(
            "  Started:             {}\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if let Some(finished) = self.finished_at {
            s.push_str(&format!(
                "  Duration:            {:.1}s\n",
                (finished - self.started_at).num_milliseconds() as f64 / 1000.0
            ));
        }
        s.push_str(&format!("  Symbols:             {}\n", self.symbols.len()));
        s.push_str(&format!("  Executed:            {}\n", self.executed()));
        s.push_str(&format!("  Held:                {}\n", self.held()));
        s.push_str(&format!("  Sizing Rejected:     {}\n", self.rejected()));
        s.push_str(&format!("  Aborted:             {}\n", self.aborted()));
        s.push('\n');

        s.push_str("SYMBOLS\n");
        s.push_str("───────────────────────────────────────────────────────────\n");
        for entry in &self.symbols {
            s.push_str(&format!(
                "  {:<8} {:<10} {}\n",
                entry.symbol,
                entry.outcome.label(),
                detail(&entry.outcome)
            ));
        }
        s.push('\n');

        s.push_str("═══════════════════════════════════════════════════════════\n");

        s
    }

    /// Export to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

fn detail(outcome: &SymbolOutcome) -> String {
    match outcome {
        SymbolOutcome::Aborted { step, reason } => format!("{} failed: {}", step, reason),
        SymbolOutcome::Hold { rationale } => rationale.clone(),
        SymbolOutcome::SizingRejected { signal, reason, .. } => {
            format!("{} not sized: {}", signal, reason)
        }
        SymbolOutcome::Executed { parameters, .. } => format!(
            "{} {} @ {} (stop {}, target {}, risk ${})",
            parameters.side,
            parameters.position_size,
            parameters.entry_price,
            parameters.stop_loss,
            parameters.take_profit,
            parameters.risk_amount
        ),
    }
}
