//! Trade execution.
//!
//! Only simulated execution is provided: [`SimulatedExecutor`] logs the
//! ticket and confirms a fill at the entry price.

mod simulator;

pub use simulator::SimulatedExecutor;
