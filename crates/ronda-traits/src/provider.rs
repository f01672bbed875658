//! The seam between the valuation engines and data sources.
//!
//! Engines never fetch anything; they consume a [`FinancialStatements`]
//! snapshot. A provider turns a ticker into that snapshot, be it over the
//! network or from a file on disk.

use crate::{FinancialStatements, Result};

/// A source of financial statements keyed by ticker symbol.
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{FinancialStatements, Result, StatementProvider};
///
/// struct Fixed(FinancialStatements);
///
/// impl StatementProvider for Fixed {
///     fn name(&self) -> &str {
///         "fixed"
///     }
///
///     async fn fetch(&self, _symbol: &str) -> Result<FinancialStatements> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait StatementProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &str;

    /// Fetch the three statements and the info record for a symbol.
    ///
    /// Statement rows must be most-recent-first.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be reached or decoded.
    fn fetch(
        &self,
        symbol: &str,
    ) -> impl std::future::Future<Output = Result<FinancialStatements>> + Send;
}
