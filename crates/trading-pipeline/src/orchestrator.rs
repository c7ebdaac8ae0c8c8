//! One analysis cycle per symbol, run strictly in sequence.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, info, warn};
use trading_core::error::{IndicatorError, TradingError};
use trading_core::traits::{
    ChartRenderer, FundamentalSource, MarketDataProvider, TradeExecutor, VisionAnalyzer,
};
use trading_core::types::{
    ChartAnalysis, ChartSettings, Confirmation, RenderedChart, SignalType, TradeParameters,
};
use trading_indicators::IndicatorEngine;
use trading_risk::RiskManager;
use trading_strategies::SignalReconciler;

use crate::report::RunReport;

/// Chart settings for both timeframes and where images are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Higher timeframe that sets the bias
    pub daily: ChartSettings,
    /// Lower timeframe that must confirm it
    pub intraday: ChartSettings,
    pub chart_dir: PathBuf,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            daily: ChartSettings::daily(),
            intraday: ChartSettings::intraday(),
            chart_dir: PathBuf::from("charts"),
        }
    }
}

/// Stage of a cycle, used to attribute failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleStep {
    FetchData,
    Indicators,
    RenderChart,
    VisionAnalysis,
    Execution,
}

impl fmt::Display for CycleStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            CycleStep::FetchData => "data fetch",
            CycleStep::Indicators => "indicator computation",
            CycleStep::RenderChart => "chart rendering",
            CycleStep::VisionAnalysis => "vision analysis",
            CycleStep::Execution => "execution",
        };
        f.write_str(name)
    }
}

/// A failure that ends one symbol's cycle.
#[derive(Error, Debug)]
#[error("{symbol}: {step} failed: {source}")]
pub struct CycleError {
    pub symbol: String,
    pub step: CycleStep,
    pub source: TradingError,
}

impl CycleError {
    pub fn new(symbol: &str, step: CycleStep, source: impl Into<TradingError>) -> Self {
        Self {
            symbol: symbol.to_string(),
            step,
            source: source.into(),
        }
    }
}

/// How a symbol's cycle ended.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SymbolOutcome {
    /// A data, indicator, chart, vision or execution step failed
    Aborted { step: CycleStep, reason: String },
    /// The timeframes did not agree or the analysis was incomplete
    Hold { rationale: String },
    /// A trade was signalled but could not be sized
    SizingRejected {
        signal: SignalType,
        rationale: String,
        reason: String,
    },
    /// A trade was sized and the simulated fill confirmed
    Executed {
        rationale: String,
        parameters: TradeParameters,
        confirmation: Confirmation,
    },
}

impl SymbolOutcome {
    /// Short label used in reports.
    pub fn label(&self) -> &'static str {
        match self {
            SymbolOutcome::Aborted { .. } => "ABORTED",
            SymbolOutcome::Hold { .. } => "HOLD",
            SymbolOutcome::SizingRejected { .. } => "REJECTED",
            SymbolOutcome::Executed { .. } => "EXECUTED",
        }
    }
}

/// External services the cycle talks to.
pub struct Collaborators {
    pub provider: Box<dyn MarketDataProvider>,
    pub renderer: Box<dyn ChartRenderer>,
    pub vision: Box<dyn VisionAnalyzer>,
    pub fundamentals: Box<dyn FundamentalSource>,
    pub executor: Box<dyn TradeExecutor>,
}

/// A rendered chart plus the close of its newest bar.
struct PreparedChart {
    chart: RenderedChart,
    last_close: f64,
}

/// Runs the analysis cycle for each symbol.
pub struct Orchestrator<'a> {
    config: &'a PipelineConfig,
    parts: Collaborators,
    reconciler: SignalReconciler,
    risk: RiskManager,
}

impl<'a> Orchestrator<'a> {
    pub fn new(config: &'a PipelineConfig, parts: Collaborators, risk: RiskManager) -> Self {
        Self {
            config,
            parts,
            reconciler: SignalReconciler::new(),
            risk,
        }
    }

    /// Run every symbol one after another.
    ///
    /// A failing symbol is recorded as aborted and the batch moves on.
    pub async fn run_batch(&self, symbols: &[String]) -> RunReport {
        info!(
            "Starting run over {} symbol(s) with data from {} and model {}",
            symbols.len(),
            self.parts.provider.name(),
            self.parts.vision.model()
        );

        let mut report = RunReport::new();
        for symbol in symbols {
            let outcome = self.run_cycle(symbol).await;
            report.record(symbol, outcome);
        }
        report.finish();

        info!(
            "Run finished: {} executed, {} held, {} rejected, {} aborted",
            report.executed(),
            report.held(),
            report.rejected(),
            report.aborted()
        );
        report
    }

    /// Run one cycle. Never fails; failures become [`SymbolOutcome::Aborted`].
    pub async fn run_cycle(&self, symbol: &str) -> SymbolOutcome {
        info!("Processing {}", symbol);

        match self.try_cycle(symbol).await {
            Ok(outcome) => {
                info!("{} finished with {}", symbol, outcome.label());
                outcome
            }
            Err(e) => {
                error!("Aborting cycle for {}", e);
                SymbolOutcome::Aborted {
                    step: e.step,
                    reason: e.source.to_string(),
                }
            }
        }
    }

    async fn try_cycle(&self, symbol: &str) -> Result<SymbolOutcome, CycleError> {
        let daily = self.prepare_chart(symbol, &self.config.daily).await;
        let intraday = self.prepare_chart(symbol, &self.config.intraday).await;
        let (daily, intraday) = both(daily, intraday)?;

        let daily_analysis = self.analyze(symbol, &daily.chart).await;
        let intraday_analysis = self.analyze(symbol, &intraday.chart).await;
        let (daily_analysis, intraday_analysis) = both(daily_analysis, intraday_analysis)?;

        let fundamental = self.parts.fundamentals.analysis(symbol).await;
        let decision =
            self.reconciler
                .reconcile(symbol, &daily_analysis, &intraday_analysis, &fundamental);

        if !decision.signal.is_actionable() {
            return Ok(SymbolOutcome::Hold {
                rationale: decision.rationale,
            });
        }

        let parameters = match self.risk.size(
            symbol,
            decision.signal,
            intraday.last_close,
            &intraday_analysis,
        ) {
            Ok(parameters) => parameters,
            Err(e) => {
                warn!("Skipping trade for {}: {}", symbol, e);
                return Ok(SymbolOutcome::SizingRejected {
                    signal: decision.signal,
                    rationale: decision.rationale,
                    reason: e.to_string(),
                });
            }
        };

        let confirmation = self
            .parts
            .executor
            .execute(Some(&parameters))
            .await
            .map_err(|e| CycleError::new(symbol, CycleStep::Execution, e))?
            .ok_or_else(|| {
                CycleError::new(
                    symbol,
                    CycleStep::Execution,
                    TradingError::Internal(format!(
                        "{} returned no confirmation",
                        self.parts.executor.name()
                    )),
                )
            })?;

        Ok(SymbolOutcome::Executed {
            rationale: decision.rationale,
            parameters,
            confirmation,
        })
    }

    /// Fetch, augment and draw one timeframe.
    async fn prepare_chart(
        &self,
        symbol: &str,
        settings: &ChartSettings,
    ) -> Result<PreparedChart, CycleError> {
        let request = settings.request_for(symbol, &self.config.chart_dir);

        let bars = self
            .parts
            .provider
            .fetch_bars(symbol, settings.timeframe, settings.num_points)
            .await
            .map_err(|e| CycleError::new(symbol, CycleStep::FetchData, e))?;
        info!(
            "Fetched {} {} bars for {}",
            bars.len(),
            settings.timeframe,
            symbol
        );

        let rows = IndicatorEngine::compute(&bars, &settings.indicators)
            .map_err(|e| CycleError::new(symbol, CycleStep::Indicators, e))?;
        let last_close = rows
            .last()
            .map(|row| row.bar.close)
            .ok_or_else(|| {
                CycleError::new(
                    symbol,
                    CycleStep::Indicators,
                    IndicatorError::InsufficientData {
                        required: settings.indicators.warmup_period(),
                        available: bars.len(),
                    },
                )
            })?;

        let chart = self
            .parts
            .renderer
            .render(&rows, &request)
            .map_err(|e| CycleError::new(symbol, CycleStep::RenderChart, e))?;
        info!(
            "Rendered {} with {} rows to {}",
            request.title,
            chart.rows,
            chart.path.display()
        );

        Ok(PreparedChart { chart, last_close })
    }

    async fn analyze(
        &self,
        symbol: &str,
        chart: &RenderedChart,
    ) -> Result<ChartAnalysis, CycleError> {
        self.parts
            .vision
            .analyze_chart(&chart.path)
            .await
            .map_err(|e| CycleError::new(symbol, CycleStep::VisionAnalysis, e))
    }
}

/// Combine two attempts; the first failure wins, a second one is logged.
fn both<A, B>(
    first: Result<A, CycleError>,
    second: Result<B, CycleError>,
) -> Result<(A, B), CycleError> {
    match (first, second) {
        (Ok(a), Ok(b)) => Ok((a, b)),
        (Err(e), Ok(_)) | (Ok(_), Err(e)) => Err(e),
        (Err(e), Err(other)) => {
            warn!("Also failed: {}", other);
            Err(e)
        }
    }
}
