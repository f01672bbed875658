//! Logical statement fields and the synonyms accepted for each.
//!
//! Statement columns are named by the data provider and differ between
//! companies. Every field the engines read is declared here together with the
//! ordered list of column names that may carry it, so the fallback chain is a
//! table that can be inspected and tested rather than scattered lookups.

use serde::{Deserialize, Serialize};

/// How the synonyms of a [`LineItem`] are resolved against a row.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LookupPolicy {
    /// Take the first synonym present in the row, whatever its value.
    FirstPresent,
    /// Take the first synonym present in the row with a non-zero value.
    FirstNonZero,
}

/// A logical field read from one of the three financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LineItem {
    // Income statement
    /// Total revenue.
    TotalRevenue,
    /// Gross profit.
    GrossProfit,
    /// Operating income.
    OperatingIncome,
    /// Net income.
    NetIncome,

    // Balance sheet
    /// Total assets.
    TotalAssets,
    /// Total current assets.
    CurrentAssets,
    /// Total current liabilities.
    CurrentLiabilities,
    /// Inventory.
    Inventory,
    /// Short-term debt and current portion of long-term debt.
    ShortTermDebt,
    /// Long-term debt.
    LongTermDebt,
    /// Cash and cash equivalents.
    CashAndEquivalents,
    /// Minority (non-controlling) interest.
    MinorityInterest,
    /// Total equity.
    TotalEquity,

    // Cash-flow statement
    /// Operating cash flow.
    OperatingCashFlow,
    /// Capital expenditure.
    CapitalExpenditure,
    /// Depreciation, used as a maintenance capex proxy.
    Depreciation,
}

impl LineItem {
    /// Every line item, in declaration order.
    pub const ALL: [Self; 16] = [
        Self::TotalRevenue,
        Self::GrossProfit,
        Self::OperatingIncome,
        Self::NetIncome,
        Self::TotalAssets,
        Self::CurrentAssets,
        Self::CurrentLiabilities,
        Self::Inventory,
        Self::ShortTermDebt,
        Self::LongTermDebt,
        Self::CashAndEquivalents,
        Self::MinorityInterest,
        Self::TotalEquity,
        Self::OperatingCashFlow,
        Self::CapitalExpenditure,
        Self::Depreciation,
    ];

    /// Column names accepted for this field, highest priority first.
    #[must_use]
    pub const fn synonyms(&self) -> &'static [&'static str] {
        match self {
            Self::TotalRevenue => &["Total Revenue", "Revenue"],
            Self::GrossProfit => &["Gross Profit"],
            Self::OperatingIncome => &["Operating Income"],
            Self::NetIncome => &["Net Income"],
            Self::TotalAssets => &["Total Assets"],
            Self::CurrentAssets => &["Current Assets"],
            Self::CurrentLiabilities => &["Current Liabilities"],
            Self::Inventory => &["Inventory"],
            Self::ShortTermDebt => &["Short Long Term Debt"],
            Self::LongTermDebt => &["Long Term Debt"],
            Self::CashAndEquivalents => &["Cash And Cash Equivalents"],
            Self::MinorityInterest => &["Minority Interest"],
            Self::TotalEquity => &["Total Equity Gross Minority Interest", "Stockholders Equity"],
            Self::OperatingCashFlow => &["Operating Cash Flow"],
            Self::CapitalExpenditure => &[
                "Capital Expenditure",
                "Capital Expenditures",
                "Purchase Of PPE",
            ],
            Self::Depreciation => &["Depreciation", "Depreciation And Amortization"],
        }
    }

    /// The canonical column name, used when writing tables.
    #[must_use]
    pub const fn canonical_name(&self) -> &'static str {
        self.synonyms()[0]
    }

    /// How synonyms are resolved for this field.
    ///
    /// Capital expenditure skips zero entries so that a placeholder zero under
    /// one spelling does not hide the real figure under another.
    #[must_use]
    pub const fn policy(&self) -> LookupPolicy {
        match self {
            Self::CapitalExpenditure => LookupPolicy::FirstNonZero,
            _ => LookupPolicy::FirstPresent,
        }
    }

    /// Resolve this field against a row accessor.
    ///
    /// `cell` returns the value of a named column in the row, or `None` when
    /// the column is absent. Null and NaN cells count as absent. Returns `0.0`
    /// when no synonym matches.
    pub fn resolve<F>(&self, mut cell: F) -> f64
    where
        F: FnMut(&str) -> Option<f64>,
    {
        let policy = self.policy();
        self.synonyms()
            .iter()
            .filter_map(|name| cell(name).filter(|v| !v.is_nan()))
            .find(|v| match policy {
                LookupPolicy::FirstPresent => true,
                LookupPolicy::FirstNonZero => *v != 0.0,
            })
            .unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn row(cells: &[(&str, f64)]) -> HashMap<String, f64> {
        cells.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
    }

    #[test]
    fn test_capex_synonyms_in_priority_order() {
        assert_eq!(
            LineItem::CapitalExpenditure.synonyms(),
            &["Capital Expenditure", "Capital Expenditures", "Purchase Of PPE"]
        );
        assert_eq!(LineItem::CapitalExpenditure.policy(), LookupPolicy::FirstNonZero);
    }

    #[test]
    fn test_first_present_takes_zero() {
        let r = row(&[("Total Revenue", 0.0), ("Revenue", 500.0)]);
        let v = LineItem::TotalRevenue.resolve(|k| r.get(k).copied());
        assert_eq!(v, 0.0);
    }

    #[test]
    fn test_first_present_falls_back() {
        let r = row(&[("Revenue", 500.0)]);
        let v = LineItem::TotalRevenue.resolve(|k| r.get(k).copied());
        assert_eq!(v, 500.0);
    }

    #[test]
    fn test_first_non_zero_skips_zero() {
        let r = row(&[("Capital Expenditure", 0.0), ("Purchase Of PPE", -42.0)]);
        let v = LineItem::CapitalExpenditure.resolve(|k| r.get(k).copied());
        assert_eq!(v, -42.0);
    }

    #[test]
    fn test_nan_counts_as_absent() {
        let r = row(&[("Total Revenue", f64::NAN), ("Revenue", 7.0)]);
        let v = LineItem::TotalRevenue.resolve(|k| r.get(k).copied());
        assert_eq!(v, 7.0);
    }

    #[test]
    fn test_missing_defaults_to_zero() {
        let r = row(&[]);
        for item in LineItem::ALL {
            assert_eq!(item.resolve(|k| r.get(k).copied()), 0.0);
        }
    }

    #[test]
    fn test_canonical_names_are_unique() {
        let mut names: Vec<_> = LineItem::ALL.iter().map(LineItem::canonical_name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), LineItem::ALL.len());
    }
}
