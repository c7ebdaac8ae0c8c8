//! Per-symbol analysis cycle.
//!
//! [`Orchestrator`] drives one symbol at a time through data, indicators,
//! charts, vision analysis, reconciliation, sizing and simulated execution.
//! [`RunReport`] collects the outcome of a batch.

mod orchestrator;
mod report;

pub use orchestrator::{
    Collaborators, CycleError, CycleStep, Orchestrator, PipelineConfig, SymbolOutcome,
};
pub use report::{RunReport, SymbolReport};
