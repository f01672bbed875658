//! Statement snapshots stored as JSON on disk.
//!
//! A snapshot holds the three statements and the info record for one ticker:
//!
//! ```json
//! {
//!   "symbol": "ACME",
//!   "info": {"sharesOutstanding": 10000000, "currentPrice": 8.0},
//!   "income_statement": [{"date": "2024-12-31", "Total Revenue": 100000000}],
//!   "balance_sheet": [{"date": "2024-12-31", "Long Term Debt": 30000000}],
//!   "cash_flow": [{"date": "2024-12-31", "Operating Cash Flow": 25000000}]
//! }
//! ```
//!
//! Rows are most recent first. Numeric cells become line items, `null` cells
//! are absent, and other non-numeric cells are ignored.

use crate::{
    CompanyInfo, FinancialStatements, Result, RondaError, StatementProvider, StatementRecord,
    StatementTable, types::DATE_COLUMN,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};

/// Raw JSON rows of one statement.
pub type SnapshotRows = Vec<Map<String, Value>>;

/// The on-disk form of a [`FinancialStatements`] bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Company info record.
    #[serde(default)]
    pub info: CompanyInfo,
    /// Income statement rows.
    #[serde(default)]
    pub income_statement: SnapshotRows,
    /// Balance sheet rows.
    #[serde(default)]
    pub balance_sheet: SnapshotRows,
    /// Cash-flow statement rows.
    #[serde(default)]
    pub cash_flow: SnapshotRows,
}

impl Snapshot {
    /// Parse a snapshot from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is not a valid snapshot.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read a snapshot file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&text)
    }

    /// Convert into the statement bundle consumed by the engines.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement cannot be assembled into a table.
    pub fn into_statements(self) -> Result<FinancialStatements> {
        Ok(FinancialStatements::new(
            self.symbol,
            rows_to_table(&self.income_statement)?,
            rows_to_table(&self.balance_sheet)?,
            rows_to_table(&self.cash_flow)?,
            self.info,
        ))
    }
}

/// Turn JSON rows into a statement table.
///
/// # Errors
///
/// Returns an error if Polars rejects the assembled columns.
pub fn rows_to_table(rows: &[Map<String, Value>]) -> Result<StatementTable> {
    let records: Vec<StatementRecord> = rows.iter().map(row_to_record).collect();
    StatementTable::from_records(&records)
}

fn row_to_record(row: &Map<String, Value>) -> StatementRecord {
    let date = row
        .get(DATE_COLUMN)
        .and_then(Value::as_str)
        .map(str::to_string);
    let values = row
        .iter()
        .filter(|(name, _)| name.as_str() != DATE_COLUMN)
        .filter_map(|(name, value)| value.as_f64().map(|v| (name.clone(), v)))
        .collect();
    StatementRecord { date, values }
}

/// Serves snapshots from a single file or a directory of `<SYMBOL>.json` files.
#[derive(Debug, Clone)]
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    /// Create a store rooted at a file or directory.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The file a symbol resolves to.
    ///
    /// In a directory, `<SYMBOL>.json` in upper case is preferred; otherwise
    /// the symbol is used as given.
    #[must_use]
    pub fn path_for(&self, symbol: &str) -> PathBuf {
        if !self.path.is_dir() {
            return self.path.clone();
        }
        let upper = self.path.join(format!("{}.json", symbol.to_uppercase()));
        if upper.is_file() {
            upper
        } else {
            self.path.join(format!("{symbol}.json"))
        }
    }

    /// Load the statements for a symbol synchronously.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read, or if it belongs to a
    /// different symbol.
    pub fn load(&self, symbol: &str) -> Result<FinancialStatements> {
        let path = self.path_for(symbol);
        tracing::debug!(path = %path.display(), symbol, "loading statement snapshot");

        let mut snapshot = Snapshot::load(&path)?;
        if snapshot.symbol.is_empty() {
            snapshot.symbol = symbol.to_uppercase();
        } else if !snapshot.symbol.eq_ignore_ascii_case(symbol) {
            return Err(RondaError::InvalidData(format!(
                "snapshot {} holds {}, not {}",
                path.display(),
                snapshot.symbol,
                symbol
            )));
        }
        snapshot.into_statements()
    }
}

impl StatementProvider for SnapshotStore {
    fn name(&self) -> &str {
        "snapshot"
    }

    async fn fetch(&self, symbol: &str) -> Result<FinancialStatements> {
        self.load(symbol)
    }
}
