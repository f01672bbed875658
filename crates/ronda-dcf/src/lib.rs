//! Discounted cash flow valuation for ronda.
//!
//! This crate turns a company's statements into an intrinsic value estimate:
//! - [`fcf`]: historical free cash flow from the cash-flow statement
//! - [`projection`]: revenue, margin and FCF projected over the horizon
//! - [`engine`]: terminal value, discounting and the bridge to value per share
//! - [`scenario`]: bull, base and bear runs around one assumption set
//!
//! Every function here is pure. Nothing is cached between calls, so the same
//! statements and assumptions always give bit-identical results.
//!
//! # Example
//!
//! ```ignore
//! use ronda_dcf::{AssumptionSet, DcfEngine, ScenarioRunner};
//!
//! let engine = DcfEngine::default();
//! let base = engine.value(&statements, &AssumptionSet::default())?;
//!
//! let scenarios = ScenarioRunner::new(engine).run(&statements, &AssumptionSet::default());
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod assumptions;
pub mod config;
pub mod engine;
pub mod fcf;
pub mod projection;
pub mod scenario;
pub mod valuation;

// Re-export key types
pub use assumptions::AssumptionSet;
pub use config::{DcfConfig, Methodology};
pub use engine::{DcfEngine, run_dcf};
pub use fcf::{FcfSeries, historical_fcf};
pub use projection::{ProjectedYear, ProjectionInputs, project_cash_flows};
pub use scenario::{Scenario, ScenarioRunner, ScenarioSet, ScenarioSummary, ValuationSummary};
pub use valuation::ValuationResult;
