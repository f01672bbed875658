//! Statement tables, the company info record and the statement bundle.
//!
//! A [`StatementTable`] wraps a Polars DataFrame in which each row is a fiscal
//! period (most recent first, as delivered by the provider) and each column a
//! line item. Line-item names are whatever the provider used; fields are read
//! through [`LineItem`] so that synonyms resolve in a fixed order.

use crate::{LineItem, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

// Re-export date type from chrono
pub use chrono::NaiveDate as Date;

/// A market symbol identifier.
pub type Symbol = String;

/// Name of the optional period-end column.
pub const DATE_COLUMN: &str = "date";

/// One period of a statement as plain values, used to build tables.
///
/// Serializes flat: `{"date": "2024-12-31", "Total Revenue": 1.0e8, ...}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatementRecord {
    /// Period end date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Line-item values keyed by column name.
    #[serde(flatten)]
    pub values: BTreeMap<String, f64>,
}

impl StatementRecord {
    /// Create an empty record for the given period end.
    #[must_use]
    pub fn new(date: impl Into<String>) -> Self {
        Self {
            date: Some(date.into()),
            values: BTreeMap::new(),
        }
    }

    /// Add a line item, builder style.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: f64) -> Self {
        self.values.insert(name.into(), value);
        self
    }

    /// Add a line item only when the value is known.
    #[must_use]
    pub fn with_opt(self, name: impl Into<String>, value: Option<f64>) -> Self {
        match value {
            Some(v) => self.with(name, v),
            None => self,
        }
    }
}

/// A financial statement: one row per period, one column per line item.
///
/// # Expected Schema
///
/// - `date` (optional): period end, as a string or Polars date
/// - any number of numeric line-item columns, e.g. `Total Revenue`
///
/// # Example
///
/// ```no_run
/// use ronda_traits::{LineItem, StatementTable};
/// use polars::prelude::*;
///
/// let df = df! {
///     "date" => &["2024-12-31", "2023-12-31"],
///     "Total Revenue" => &[110.0, 100.0],
/// }.unwrap();
///
/// let income = StatementTable::new(df);
/// assert_eq!(income.value(0, LineItem::TotalRevenue), 110.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct StatementTable {
    data: DataFrame,
}

impl StatementTable {
    /// Creates a table from a DataFrame whose rows are most-recent-first.
    pub const fn new(data: DataFrame) -> Self {
        Self { data }
    }

    /// A table with no periods.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Builds a table from records, most recent first.
    ///
    /// Columns are the union of the records' line items; a record missing a
    /// line item gets a null cell. The `date` column is always written, so a
    /// record with no values still counts as a period.
    ///
    /// # Errors
    ///
    /// Returns an error if Polars rejects the assembled columns.
    pub fn from_records(records: &[StatementRecord]) -> Result<Self> {
        if records.is_empty() {
            return Ok(Self::empty());
        }

        let names: BTreeSet<&str> = records
            .iter()
            .flat_map(|r| r.values.keys().map(String::as_str))
            .filter(|name| *name != DATE_COLUMN)
            .collect();

        let mut columns: Vec<Column> = Vec::with_capacity(names.len() + 1);

        let dates: Vec<Option<String>> = records.iter().map(|r| r.date.clone()).collect();
        columns.push(Series::new(DATE_COLUMN.into(), dates).into());

        for name in names {
            let values: Vec<Option<f64>> = records
                .iter()
                .map(|r| r.values.get(name).copied())
                .collect();
            columns.push(Series::new(name.into(), values).into());
        }

        Ok(Self::new(DataFrame::new(columns)?))
    }

    /// Returns a reference to the underlying DataFrame.
    pub const fn data(&self) -> &DataFrame {
        &self.data
    }

    /// Consumes self and returns the underlying DataFrame.
    pub fn into_inner(self) -> DataFrame {
        self.data
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.data.height()
    }

    /// Whether the table has no periods.
    pub fn is_empty(&self) -> bool {
        self.data.height() == 0
    }

    /// Column names, including `date` when present.
    pub fn columns(&self) -> Vec<String> {
        self.data
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    /// Checks if a column exists.
    pub fn has_column(&self, name: &str) -> bool {
        self.data
            .get_column_names()
            .iter()
            .any(|s| s.as_str() == name)
    }

    /// Raw numeric cell lookup.
    ///
    /// Returns `None` when the row or column does not exist, when the cell is
    /// null, or when it cannot be read as a number.
    pub fn cell(&self, row: usize, name: &str) -> Option<f64> {
        if row >= self.len() || name == DATE_COLUMN {
            return None;
        }
        let column = self.data.column(name).ok()?;
        let numeric = column.cast(&DataType::Float64).ok()?;
        numeric.f64().ok()?.get(row)
    }

    /// Reads a logical field from a period, `0.0` when absent.
    pub fn value(&self, row: usize, item: LineItem) -> f64 {
        item.resolve(|name| self.cell(row, name))
    }

    /// A view of one period, if it exists.
    pub fn row(&self, index: usize) -> Option<StatementRow<'_>> {
        (index < self.len()).then_some(StatementRow { table: self, index })
    }

    /// The most recent period.
    pub fn latest(&self) -> Option<StatementRow<'_>> {
        self.row(0)
    }

    /// The period before the most recent one.
    pub fn previous(&self) -> Option<StatementRow<'_>> {
        self.row(1)
    }

    /// Period end dates as written, when a `date` column exists.
    pub fn date_labels(&self) -> Option<Vec<Option<String>>> {
        let column = self.data.column(DATE_COLUMN).ok()?;
        let text = column.cast(&DataType::String).ok()?;
        let text = text.str().ok()?;
        Some(
            text.into_iter()
                .map(|d: Option<&str>| d.map(str::to_string))
                .collect(),
        )
    }

    /// Period end dates, when a `date` column exists.
    pub fn dates(&self) -> Option<Vec<Option<NaiveDate>>> {
        Some(
            self.date_labels()?
                .into_iter()
                .map(|d| d.and_then(|d| NaiveDate::parse_from_str(d.trim(), "%Y-%m-%d").ok()))
                .collect(),
        )
    }

    /// The table as plain records, most recent first.
    ///
    /// Null and NaN cells are left out of each record.
    pub fn records(&self) -> Vec<StatementRecord> {
        let labels = self.date_labels();
        let names: Vec<String> = self
            .columns()
            .into_iter()
            .filter(|name| name != DATE_COLUMN)
            .collect();

        (0..self.len())
            .map(|row| StatementRecord {
                date: labels.as_ref().and_then(|l| l[row].clone()),
                values: names
                    .iter()
                    .filter_map(|name| {
                        self.cell(row, name)
                            .filter(|v| !v.is_nan())
                            .map(|v| (name.clone(), v))
                    })
                    .collect(),
            })
            .collect()
    }

    /// Row indices ordered oldest to newest.
    ///
    /// Sorts by period date when every row has a parseable date; otherwise
    /// trusts the provider's most-recent-first order and reverses it.
    pub fn chronological_order(&self) -> Vec<usize> {
        let n = self.len();
        match self.dates() {
            Some(dates) if dates.iter().all(Option::is_some) => {
                let mut order: Vec<usize> = (0..n).collect();
                order.sort_by_key(|&i| dates[i]);
                order
            }
            _ => (0..n).rev().collect(),
        }
    }
}

impl From<DataFrame> for StatementTable {
    fn from(data: DataFrame) -> Self {
        Self::new(data)
    }
}

impl AsRef<DataFrame> for StatementTable {
    fn as_ref(&self) -> &DataFrame {
        &self.data
    }
}

/// A borrowed view of one period in a [`StatementTable`].
#[derive(Debug, Clone, Copy)]
pub struct StatementRow<'a> {
    table: &'a StatementTable,
    index: usize,
}

impl StatementRow<'_> {
    /// Position of this period in the table (0 = most recent).
    pub const fn index(&self) -> usize {
        self.index
    }

    /// Reads a logical field, `0.0` when absent.
    pub fn get(&self, item: LineItem) -> f64 {
        self.table.value(self.index, item)
    }

    /// Raw numeric cell lookup by column name.
    pub fn cell(&self, name: &str) -> Option<f64> {
        self.table.cell(self.index, name)
    }
}

/// Scalar facts about the company.
///
/// Keys follow the provider's camelCase naming. Every numeric field falls back
/// to zero when the provider omits it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyInfo {
    /// Company name.
    #[serde(default, alias = "shortName")]
    pub long_name: Option<String>,
    /// Industry classification.
    #[serde(default)]
    pub industry: Option<String>,
    /// Sector classification.
    #[serde(default)]
    pub sector: Option<String>,
    /// Business description.
    #[serde(default)]
    pub long_business_summary: Option<String>,
    /// Market capitalization.
    #[serde(default)]
    pub market_cap: f64,
    /// Shares outstanding.
    #[serde(default)]
    pub shares_outstanding: f64,
    /// Current share price.
    #[serde(default)]
    pub current_price: f64,
}

/// The three statements and the info record for one ticker.
#[derive(Debug, Clone, Default)]
pub struct FinancialStatements {
    /// Ticker symbol.
    pub symbol: Symbol,
    /// Income statement, most recent first.
    pub income_statement: StatementTable,
    /// Balance sheet, most recent first.
    pub balance_sheet: StatementTable,
    /// Cash-flow statement, most recent first.
    pub cash_flow: StatementTable,
    /// Company info record.
    pub info: CompanyInfo,
}

impl FinancialStatements {
    /// Bundle statements for a symbol.
    #[must_use]
    pub fn new(
        symbol: impl Into<Symbol>,
        income_statement: StatementTable,
        balance_sheet: StatementTable,
        cash_flow: StatementTable,
        info: CompanyInfo,
    ) -> Self {
        Self {
            symbol: symbol.into(),
            income_statement,
            balance_sheet,
            cash_flow,
            info,
        }
    }
}
