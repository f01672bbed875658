#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/ronda/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core statement model and trait definitions for the ronda valuation toolkit.
//!
//! This crate provides the foundational types shared by the DCF engine, the
//! ratio engine and the data providers.

/// The version of the ronda-traits crate.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Module declarations
pub mod error;
pub mod format;
pub mod line_item;
pub mod outcome;
pub mod provider;
pub mod snapshot;
pub mod types;

// Re-exports
pub use error::{Result, RondaError};
pub use line_item::{LineItem, LookupPolicy};
pub use outcome::Outcome;
pub use provider::StatementProvider;
pub use snapshot::{Snapshot, SnapshotStore};
pub use types::{
    CompanyInfo, Date, FinancialStatements, StatementRecord, StatementRow, StatementTable, Symbol,
};
