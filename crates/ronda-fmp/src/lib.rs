//! Financial Modeling Prep (FMP) statement provider for ronda.
//!
//! This crate fetches the income statement, balance sheet, cash-flow
//! statement, company profile and quote for a ticker from the
//! [Financial Modeling Prep](https://financialmodelingprep.com/) API and
//! converts them into ronda's [`FinancialStatements`](ronda_traits::FinancialStatements),
//! renaming FMP's camelCase fields to the line-item names the engines read.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ronda_fmp::FmpClient;
//! use ronda_traits::StatementProvider;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = FmpClient::from_env()?.with_periods(4);
//!
//!     // All five endpoints are queried concurrently
//!     let statements = client.fetch("AAPL").await?;
//!     println!("{} income rows", statements.income_statement.len());
//!
//!     Ok(())
//! }
//! ```
//!
//! # Environment Variables
//!
//! Set `FMP_API_KEY` in your environment or `.env` file:
//!
//! ```bash
//! FMP_API_KEY=your_api_key_here
//! ```

mod client;
mod error;
mod types;

pub use client::{DEFAULT_PERIODS, FmpClient};
pub use error::FmpError;
pub use types::*;

/// Result type for FMP operations.
pub type Result<T> = std::result::Result<T, FmpError>;
