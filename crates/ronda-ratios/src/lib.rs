//! Financial ratios for ronda.
//!
//! This crate reads the latest (and, when present, prior) statement rows and
//! computes a fixed table of ratios across five categories:
//! - Profitability: gross, operating and net margin, ROE, ROA
//! - Liquidity: current and quick ratio
//! - Leverage: debt to equity
//! - Valuation: P/E and P/B
//! - Growth: year-over-year revenue, net income, assets, equity and EPS
//!
//! A ratio whose denominator is zero is left out of the result rather than
//! reported as infinite.
//!
//! # Example
//!
//! ```ignore
//! use ronda_ratios::{Ratio, compute_ratios};
//!
//! let ratios = compute_ratios(&statements)?;
//! if let Some(margin) = ratios.get(Ratio::NetMargin) {
//!     println!("net margin {margin:.3}");
//! }
//! for (name, value) in ratios.formatted() {
//!     println!("{name}: {value}");
//! }
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod engine;
pub mod map;
pub mod ratio;

// Re-export key types
pub use engine::compute_ratios;
pub use map::RatioMap;
pub use ratio::{Ratio, RatioCategory, RatioFormat, ratios_by_category};
