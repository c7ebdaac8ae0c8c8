//! Stop-loss selection from analyzed support and resistance levels.

use rust_decimal::Decimal;
use trading_core::error::SizingError;
use trading_core::types::{ChartAnalysis, PriceLevel, Side};

/// Picks the protective level nearest to the entry.
///
/// Longs stop at the highest support strictly below the entry, shorts at the
/// lowest resistance strictly above it.
#[derive(Debug, Clone, Copy, Default)]
pub struct LevelStopSelector;

impl LevelStopSelector {
    pub fn new() -> Self {
        Self
    }

    /// Select the stop price for a position entered at `entry`.
    pub fn select(
        &self,
        side: Side,
        entry: Decimal,
        analysis: &ChartAnalysis,
    ) -> Result<Decimal, SizingError> {
        if analysis.support_resistance.is_none() {
            return Err(SizingError::MalformedLevels(
                "support_resistance section is missing".into(),
            ));
        }

        match side {
            Side::Buy => {
                let support = analysis.support_levels().ok_or_else(|| {
                    SizingError::MalformedLevels("support list is missing".into())
                })?;
                levels(support, "support")?
                    .into_iter()
                    .filter(|level| *level < entry)
                    .max()
                    .ok_or(SizingError::NoSupportBelow { price: entry })
            }
            Side::Sell => {
                let resistance = analysis.resistance_levels().ok_or_else(|| {
                    SizingError::MalformedLevels("resistance list is missing".into())
                })?;
                levels(resistance, "resistance")?
                    .into_iter()
                    .filter(|level| *level > entry)
                    .min()
                    .ok_or(SizingError::NoResistanceAbove { price: entry })
            }
        }
    }
}

/// Numeric levels of a list; any entry without a usable price rejects the
/// whole list.
fn levels(entries: &[PriceLevel], kind: &str) -> Result<Vec<Decimal>, SizingError> {
    entries
        .iter()
        .enumerate()
        .map(|(i, entry)| {
            entry
                .level
                .and_then(|level| Decimal::try_from(level).ok())
                .ok_or_else(|| {
                    SizingError::MalformedLevels(format!(
                        "{} entry {} has no numeric level",
                        kind, i
                    ))
                })
        })
        .collect()
}
