#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! # ronda
//!
//! ronda is an umbrella crate that re-exports all ronda sub-crates for
//! convenience, and assembles their outputs into a single [`Report`].
//!
//! ## Crate Organization
//!
//! - [`traits`] - Statement model, line-item synonyms, errors and the provider trait
//! - [`dcf`] - Free cash flow, projection, DCF engine and scenarios
//! - [`ratios`] - Financial ratio engine
//! - [`fmp`] - Financial Modeling Prep statement provider
//! - [`report`] - Company overview, statements, valuation, scenarios and ratios in one document
//!
//! ## Architecture
//!
//! 1. A **provider** turns a ticker into [`FinancialStatements`]
//! 2. The **engines** read those statements; they never perform I/O
//! 3. Results cross into presentation as plain serializable data, with
//!    failures as `{"Error": "<message>"}`

/// Version information for the ronda crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod report;

// ============================================================================
// Core Types
// ============================================================================

/// Statement model, line-item synonyms, errors and the provider trait.
///
/// # Example
///
/// ```ignore
/// use ronda::traits::{LineItem, StatementTable};
///
/// let revenue = income.value(0, LineItem::TotalRevenue);
/// ```
pub mod traits {
    pub use ronda_traits::*;
}

// Re-export error types
pub use ronda_traits::{Result, RondaError};

// Re-export common types
pub use ronda_traits::{
    CompanyInfo, FinancialStatements, LineItem, Outcome, SnapshotStore, StatementProvider,
    StatementTable, Symbol,
};

// ============================================================================
// Valuation
// ============================================================================

/// Discounted cash flow valuation.
///
/// ## Methodologies
///
/// - **Conservative** (default): 30% margin cap, minority interest subtracted
/// - **Updated**: 35% margin cap, mega-cap floors on discount rate and
///   terminal growth, 85% FCF conversion above $1T market cap
///
/// # Example
///
/// ```ignore
/// use ronda::dcf::{AssumptionSet, DcfConfig, DcfEngine, ScenarioRunner};
///
/// let engine = DcfEngine::new(DcfConfig::updated());
/// let scenarios = ScenarioRunner::new(engine).run(&statements, &AssumptionSet::default());
/// for (scenario, result) in scenarios.iter() {
///     if let Ok(v) = result {
///         println!("{}: {:.2}", scenario.name(), v.value_per_share);
///     }
/// }
/// ```
pub mod dcf {
    pub use ronda_dcf::*;
}

pub use ronda_dcf::{AssumptionSet, DcfConfig, DcfEngine, Methodology, ValuationResult};

// ============================================================================
// Ratios
// ============================================================================

/// Financial ratio engine.
///
/// Fifteen ratios across profitability, liquidity, leverage, valuation and
/// growth. A ratio with a zero denominator is omitted.
pub mod ratios {
    pub use ronda_ratios::*;
}

pub use ronda_ratios::{RatioMap, compute_ratios};

// ============================================================================
// Data Providers
// ============================================================================

/// Financial Modeling Prep (FMP) statement provider.
///
/// ## Setup
///
/// 1. Get a free API key at <https://financialmodelingprep.com/>
/// 2. Set the `FMP_API_KEY` environment variable or add to `.env` file
pub mod fmp {
    pub use ronda_fmp::*;
}

pub use report::Report;

// ============================================================================
// Prelude
// ============================================================================

/// Prelude module for convenient imports.
///
/// ```ignore
/// use ronda::prelude::*;
/// ```
pub mod prelude {
    pub use crate::report::{Overview, Report, StatementSheets};
    pub use crate::{
        AssumptionSet, CompanyInfo, DcfConfig, DcfEngine, FinancialStatements, Methodology,
        Outcome, RatioMap, Result, RondaError, SnapshotStore, StatementProvider,
        ValuationResult, compute_ratios,
    };
    pub use ronda_dcf::{Scenario, ScenarioRunner, ScenarioSet};
}

// ============================================================================
// Tests
// ============================================================================
