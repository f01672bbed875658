//! Historical free cash flow.
//!
//! FCF for a period is operating cash flow less capital expenditure. Capex is
//! read through the [`LineItem::CapitalExpenditure`] synonyms; when none of
//! them carries a non-zero value, depreciation stands in as the maintenance
//! capex estimate. Capex is subtracted as reported, so sources must deliver
//! it as a positive spend.

use ronda_traits::{LineItem, Result, RondaError, StatementRow, StatementTable};
use serde::{Deserialize, Serialize};

/// Where a period's capital expenditure figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapexSource {
    /// Reported capital expenditure.
    Reported,
    /// Depreciation used as a maintenance capex proxy.
    DepreciationProxy,
    /// Neither capex nor depreciation was available.
    Missing,
}

/// Free cash flow for one period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodFcf {
    /// Row index in the source statement (0 = most recent).
    pub period: usize,
    /// Operating cash flow.
    pub operating_cash_flow: f64,
    /// Capital expenditure as reported.
    pub capital_expenditure: f64,
    /// Where the capex figure came from.
    pub capex_source: CapexSource,
    /// Operating cash flow less capital expenditure.
    pub free_cash_flow: f64,
}

/// Historical free cash flow, ordered oldest to newest.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FcfSeries {
    periods: Vec<PeriodFcf>,
}

impl FcfSeries {
    /// Per-period detail, oldest first.
    pub fn periods(&self) -> &[PeriodFcf] {
        &self.periods
    }

    /// FCF values, oldest first.
    pub fn values(&self) -> Vec<f64> {
        self.periods.iter().map(|p| p.free_cash_flow).collect()
    }

    /// The most recent FCF value.
    pub fn latest(&self) -> f64 {
        self.periods.last().map_or(0.0, |p| p.free_cash_flow)
    }

    /// Number of periods.
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Whether the series has no periods.
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }
}

/// Free cash flow for a single cash-flow statement period.
pub fn period_fcf(row: &StatementRow<'_>) -> PeriodFcf {
    let operating_cash_flow = row.get(LineItem::OperatingCashFlow);
    let reported = row.get(LineItem::CapitalExpenditure);

    let (capex, capex_source) = if reported != 0.0 {
        (reported, CapexSource::Reported)
    } else {
        let depreciation = row.get(LineItem::Depreciation);
        if depreciation != 0.0 {
            (depreciation, CapexSource::DepreciationProxy)
        } else {
            (0.0, CapexSource::Missing)
        }
    };

    PeriodFcf {
        period: row.index(),
        operating_cash_flow,
        capital_expenditure: capex,
        capex_source,
        free_cash_flow: operating_cash_flow - capex,
    }
}

/// Compute the historical FCF series from a cash-flow statement.
///
/// One value is produced per period. The series is re-sorted oldest to newest
/// so that [`FcfSeries::latest`] is the most recent period regardless of the
/// order the provider delivered.
///
/// # Errors
///
/// Returns [`RondaError::NoFreeCashFlowHistory`] when the statement has no
/// periods.
pub fn historical_fcf(cash_flow: &StatementTable) -> Result<FcfSeries> {
    if cash_flow.is_empty() {
        return Err(RondaError::NoFreeCashFlowHistory);
    }

    let periods: Vec<PeriodFcf> = cash_flow
        .chronological_order()
        .into_iter()
        .filter_map(|i| cash_flow.row(i))
        .map(|row| period_fcf(&row))
        .collect();

    let proxied = periods
        .iter()
        .filter(|p| p.capex_source == CapexSource::DepreciationProxy)
        .count();
    if proxied > 0 {
        tracing::warn!(
            periods = proxied,
            "capital expenditure missing, using depreciation as maintenance capex"
        );
    }

    Ok(FcfSeries { periods })
}
