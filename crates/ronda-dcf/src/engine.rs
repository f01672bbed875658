//! The DCF valuation engine.
//!
//! A valuation runs in a fixed sequence:
//!
//! 1. Historical FCF from the cash-flow statement (fails when it has no periods)
//! 2. Latest revenue and operating margin from the income statement
//! 3. FCF projection over the horizon
//! 4. Gordon Growth terminal value (fails unless discount rate > terminal growth)
//! 5. Discounting of the projected flows and the terminal value
//! 6. Bridge from enterprise value to equity value and value per share
//!
//! Any line item or info field the provider omitted reads as zero.

use crate::{
    AssumptionSet, DcfConfig,
    fcf::historical_fcf,
    projection::{ProjectionInputs, project},
    valuation::ValuationResult,
};
use ronda_traits::{FinancialStatements, LineItem, Result, RondaError};

/// Terminal value at the end of the horizon, by the Gordon Growth formula.
///
/// # Errors
///
/// Returns [`RondaError::InvalidTerminalValue`] when `discount_rate` does not
/// exceed `terminal_growth`.
pub fn terminal_value(last_fcf: f64, discount_rate: f64, terminal_growth: f64) -> Result<f64> {
    if discount_rate <= terminal_growth {
        return Err(RondaError::InvalidTerminalValue {
            discount_rate,
            terminal_growth,
        });
    }
    Ok(last_fcf * (1.0 + terminal_growth) / (discount_rate - terminal_growth))
}

/// Present value of a flow received `years` years from now.
pub fn present_value(amount: f64, discount_rate: f64, years: u32) -> f64 {
    amount / (1.0 + discount_rate).powi(years as i32)
}

/// Operating margin, zero when there is no revenue.
pub fn operating_margin(operating_income: f64, revenue: f64) -> f64 {
    if revenue == 0.0 {
        0.0
    } else {
        operating_income / revenue
    }
}

/// DCF valuation engine bound to one methodology.
///
/// The engine holds no state beyond its configuration; every call to
/// [`DcfEngine::value`] is a pure function of its arguments.
///
/// # Example
///
/// ```ignore
/// use ronda_dcf::{AssumptionSet, DcfConfig, DcfEngine};
///
/// let engine = DcfEngine::new(DcfConfig::updated());
/// let result = engine.value(&statements, &AssumptionSet::default())?;
/// println!("{:.2} per share", result.value_per_share);
/// ```
#[derive(Debug, Clone, Default)]
pub struct DcfEngine {
    config: DcfConfig,
}

impl DcfEngine {
    /// Create an engine with the given configuration.
    #[must_use]
    pub const fn new(config: DcfConfig) -> Self {
        Self { config }
    }

    /// The engine configuration.
    #[must_use]
    pub const fn config(&self) -> &DcfConfig {
        &self.config
    }

    /// Value a company under a set of assumptions.
    ///
    /// # Errors
    ///
    /// - [`RondaError::NoFreeCashFlowHistory`] when the cash-flow statement is empty
    /// - [`RondaError::InvalidTerminalValue`] when the discount rate, after any
    ///   mega-cap floor, does not exceed terminal growth
    /// - [`RondaError::InvalidAssumption`] for a zero horizon or non-finite rate
    pub fn value(
        &self,
        statements: &FinancialStatements,
        assumptions: &AssumptionSet,
    ) -> Result<ValuationResult> {
        let history = historical_fcf(&statements.cash_flow)?;
        let last_fcf = history.latest();

        let info = &statements.info;
        let effective = assumptions.with_mega_cap_floors(info.market_cap, &self.config);
        if effective != *assumptions {
            tracing::warn!(
                symbol = %statements.symbol,
                market_cap = info.market_cap,
                discount_rate = effective.discount_rate,
                terminal_growth = effective.terminal_growth,
                "mega-cap floors raised the valuation assumptions"
            );
        }
        effective.validate()?;

        let income = &statements.income_statement;
        let revenue = income.value(0, LineItem::TotalRevenue);
        let margin = operating_margin(income.value(0, LineItem::OperatingIncome), revenue);

        tracing::debug!(
            symbol = %statements.symbol,
            last_fcf,
            revenue,
            margin,
            "valuation inputs"
        );

        let projection = project(
            &ProjectionInputs {
                last_fcf,
                revenue,
                operating_margin: margin,
                revenue_growth: effective.revenue_growth,
                margin_improvement: effective.margin_improvement,
                years: effective.projection_years,
                market_cap: info.market_cap,
            },
            &self.config,
        );
        let projected_fcf: Vec<f64> = projection.iter().map(|y| y.free_cash_flow).collect();

        let final_fcf = projected_fcf.last().copied().ok_or_else(|| {
            RondaError::InvalidAssumption("projection produced no cash flows".to_string())
        })?;
        let terminal = terminal_value(
            final_fcf,
            effective.discount_rate,
            effective.terminal_growth,
        )?;

        let pv_projected_fcf: f64 = projection
            .iter()
            .map(|y| present_value(y.free_cash_flow, effective.discount_rate, y.year))
            .sum();
        let pv_terminal_value =
            present_value(terminal, effective.discount_rate, effective.projection_years);
        let enterprise_value = pv_projected_fcf + pv_terminal_value;

        let balance = &statements.balance_sheet;
        let cash = balance.value(0, LineItem::CashAndEquivalents);
        let debt =
            balance.value(0, LineItem::ShortTermDebt) + balance.value(0, LineItem::LongTermDebt);
        let minority_interest = if self.config.subtract_minority_interest {
            balance.value(0, LineItem::MinorityInterest)
        } else {
            0.0
        };
        let equity_value = enterprise_value - debt + cash - minority_interest;

        let shares = info.shares_outstanding;
        let value_per_share = if shares > 0.0 {
            equity_value / shares
        } else {
            tracing::warn!(symbol = %statements.symbol, "shares outstanding unavailable");
            0.0
        };

        let current_price = info.current_price;
        let upside = if current_price == 0.0 {
            0.0
        } else {
            (value_per_share - current_price) / current_price
        };

        tracing::debug!(
            symbol = %statements.symbol,
            enterprise_value,
            terminal_value = terminal,
            equity_value,
            value_per_share,
            upside,
            "valuation complete"
        );

        Ok(ValuationResult {
            enterprise_value,
            equity_value,
            value_per_share,
            current_price,
            upside,
            projected_fcf,
            terminal_value: terminal,
            pv_projected_fcf,
            pv_terminal_value,
            historical_fcf: history.values(),
            projection,
            assumptions: effective,
            methodology: self.config.methodology,
        })
    }
}

/// Value a company with the default (conservative) methodology.
///
/// # Errors
///
/// See [`DcfEngine::value`].
pub fn run_dcf(
    statements: &FinancialStatements,
    assumptions: &AssumptionSet,
) -> Result<ValuationResult> {
    DcfEngine::default().value(statements, assumptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use polars::prelude::*;
    use ronda_traits::{CompanyInfo, StatementTable};

    fn statements(market_cap: f64, minority_interest: f64) -> FinancialStatements {
        let income = df! {
            "Total Revenue" => &[100_000_000.0],
            "Operating Income" => &[20_000_000.0],
        }
        .unwrap();
        let balance = df! {
            "Cash And Cash Equivalents" => &[10_000_000.0],
            "Long Term Debt" => &[30_000_000.0],
            "Minority Interest" => &[minority_interest],
        }
        .unwrap();
        let cash_flow = df! {
            "Operating Cash Flow" => &[25_000_000.0],
            "Capital Expenditure" => &[5_000_000.0],
        }
        .unwrap();

        FinancialStatements::new(
            "ACME",
            StatementTable::new(income),
            StatementTable::new(balance),
            StatementTable::new(cash_flow),
            CompanyInfo {
                market_cap,
                shares_outstanding: 10_000_000.0,
                current_price: 8.0,
                ..CompanyInfo::default()
            },
        )
    }

    #[test]
    fn test_terminal_value() {
        let tv = terminal_value(100.0, 0.10, 0.025).unwrap();
        assert_relative_eq!(tv, 100.0 * 1.025 / 0.075, epsilon = 1e-9);
    }

    #[test]
    fn test_terminal_value_rejects_equal_rates() {
        assert!(matches!(
            terminal_value(100.0, 0.03, 0.03),
            Err(RondaError::InvalidTerminalValue { .. })
        ));
        assert!(terminal_value(100.0, 0.02, 0.03).is_err());
    }

    #[test]
    fn test_present_value() {
        assert_relative_eq!(present_value(121.0, 0.10, 2), 100.0, epsilon = 1e-9);
        assert_relative_eq!(present_value(50.0, 0.10, 0), 50.0);
    }

    #[test]
    fn test_operating_margin_zero_revenue() {
        assert_eq!(operating_margin(10.0, 0.0), 0.0);
        assert_relative_eq!(operating_margin(20.0, 100.0), 0.2);
    }

    #[test]
    fn test_enterprise_value_is_sum_of_present_values() {
        let result = run_dcf(&statements(0.0, 0.0), &AssumptionSet::default()).unwrap();

        let expected_pv: f64 = result
            .projected_fcf
            .iter()
            .enumerate()
            .map(|(i, cf)| cf / 1.10_f64.powi(i as i32 + 1))
            .sum();
        assert_relative_eq!(result.pv_projected_fcf, expected_pv, epsilon = 1e-3);
        assert_relative_eq!(
            result.pv_terminal_value,
            result.terminal_value / 1.10_f64.powi(5),
            epsilon = 1e-3
        );
        assert_relative_eq!(
            result.enterprise_value,
            expected_pv + result.pv_terminal_value,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_equity_bridge() {
        let result = run_dcf(&statements(0.0, 0.0), &AssumptionSet::default()).unwrap();
        assert_relative_eq!(
            result.equity_value,
            result.enterprise_value - 30_000_000.0 + 10_000_000.0,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            result.value_per_share,
            result.equity_value / 10_000_000.0,
            epsilon = 1e-9
        );
        assert_relative_eq!(
            result.upside,
            (result.value_per_share - 8.0) / 8.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_minority_interest_depends_on_methodology() {
        let data = statements(0.0, 4_000_000.0);
        let conservative = DcfEngine::new(DcfConfig::conservative())
            .value(&data, &AssumptionSet::default())
            .unwrap();
        let updated = DcfEngine::new(DcfConfig::updated())
            .value(&data, &AssumptionSet::default())
            .unwrap();

        assert_relative_eq!(
            conservative.equity_value,
            conservative.enterprise_value - 20_000_000.0 - 4_000_000.0,
            epsilon = 1e-3
        );
        assert_relative_eq!(
            updated.equity_value,
            updated.enterprise_value - 20_000_000.0,
            epsilon = 1e-3
        );
    }

    #[test]
    fn test_mega_cap_floors_echoed() {
        let assumptions = AssumptionSet {
            discount_rate: 0.07,
            terminal_growth: 0.02,
            ..AssumptionSet::default()
        };
        let result = DcfEngine::new(DcfConfig::updated())
            .value(&statements(2e12, 0.0), &assumptions)
            .unwrap();
        assert_relative_eq!(result.assumptions.discount_rate, 0.075);
        assert_relative_eq!(result.assumptions.terminal_growth, 0.03);

        let untouched = DcfEngine::new(DcfConfig::conservative())
            .value(&statements(2e12, 0.0), &assumptions)
            .unwrap();
        assert_eq!(untouched.assumptions, assumptions);
    }

    #[test]
    fn test_mega_cap_floor_can_rescue_terminal_value() {
        // 2.9% discount < 3% floor on terminal growth would fail, but the
        // discount floor lifts it to 7.5% first.
        let assumptions = AssumptionSet {
            discount_rate: 0.029,
            terminal_growth: 0.025,
            ..AssumptionSet::default()
        };
        let result = DcfEngine::new(DcfConfig::updated())
            .value(&statements(2e12, 0.0), &assumptions);
        assert!(result.is_ok());
    }

    #[test]
    fn test_zero_shares_and_price() {
        let mut data = statements(0.0, 0.0);
        data.info.shares_outstanding = 0.0;
        data.info.current_price = 0.0;

        let result = run_dcf(&data, &AssumptionSet::default()).unwrap();
        assert_eq!(result.value_per_share, 0.0);
        assert_eq!(result.upside, 0.0);
        assert!(result.enterprise_value > 0.0);
    }

    #[test]
    fn test_missing_income_statement_degrades_to_zero() {
        let mut data = statements(0.0, 0.0);
        data.income_statement = StatementTable::empty();

        let result = run_dcf(&data, &AssumptionSet::default()).unwrap();
        // Zero revenue: only the first-year floor carries value.
        assert_relative_eq!(result.projected_fcf[0], 20_500_000.0, epsilon = 1e-6);
        assert!(result.projected_fcf[1..].iter().all(|cf| *cf == 0.0));
    }

    #[test]
    fn test_history_checked_before_assumptions() {
        let mut data = statements(0.0, 0.0);
        data.cash_flow = StatementTable::empty();
        let bad = AssumptionSet {
            discount_rate: 0.01,
            ..AssumptionSet::default()
        };
        assert!(matches!(
            run_dcf(&data, &bad),
            Err(RondaError::NoFreeCashFlowHistory)
        ));
    }

    #[test]
    fn test_end_to_end_small_company() {
        let result = run_dcf(&statements(0.0, 0.0), &AssumptionSet::default()).unwrap();

        assert_eq!(result.historical_fcf, vec![20_000_000.0]);
        assert_eq!(result.projected_fcf.len(), 5);
        assert!(result.projected_fcf[0] >= 20_500_000.0);
        assert!(result.value_per_share.is_finite());
        assert!(result.value_per_share > 0.0);
        assert_eq!(result.methodology, crate::Methodology::Conservative);
    }

    #[test]
    fn test_valuation_is_idempotent() {
        let data = statements(5e9, 1_000_000.0);
        let assumptions = AssumptionSet::default();
        let first = run_dcf(&data, &assumptions).unwrap();
        let second = run_dcf(&data, &assumptions).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_terminal_value_rises_with_growth() {
        let data = statements(0.0, 0.0);
        let mut last = f64::NEG_INFINITY;
        for g in [0.0, 0.01, 0.02, 0.03, 0.04] {
            let assumptions = AssumptionSet {
                terminal_growth: g,
                ..AssumptionSet::default()
            };
            let result = run_dcf(&data, &assumptions).unwrap();
            assert!(result.terminal_value > last);
            last = result.terminal_value;
        }
    }

    #[test]
    fn test_equal_rates_fail_with_terminal_value_error() {
        let assumptions = AssumptionSet {
            discount_rate: 0.03,
            terminal_growth: 0.03,
            ..AssumptionSet::default()
        };
        let err = run_dcf(&statements(0.0, 0.0), &assumptions).unwrap_err();
        assert!(matches!(err, RondaError::InvalidTerminalValue { .. }));
    }

    #[test]
    fn test_empty_cash_flow_serializes_error_tag() {
        let mut data = statements(0.0, 0.0);
        data.cash_flow = StatementTable::empty();
        let outcome: ronda_traits::Outcome<f64> = run_dcf(&data, &AssumptionSet::default())
            .map(|r| r.value_per_share)
            .into();
        assert_eq!(
            serde_json::to_string(&outcome).unwrap(),
            r#"{"Error":"Unable to calculate historical free cash flow"}"#
        );
    }

    #[test]
    fn test_value_per_share_non_negative_without_debt() {
        let mut data = statements(0.0, 0.0);
        data.balance_sheet = StatementTable::empty();
        for growth in [0.0, 0.05, 0.15] {
            let assumptions = AssumptionSet {
                revenue_growth: growth,
                ..AssumptionSet::default()
            };
            let result = run_dcf(&data, &assumptions).unwrap();
            assert!(result.value_per_share >= 0.0);
        }
    }
}
