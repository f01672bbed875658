//! Free cash flow projection.
//!
//! Revenue compounds at the assumed growth rate, operating margin expands by a
//! fixed step up to the configured ceiling, and FCF is operating income times
//! the conversion ratio. The first projected year is floored at a half-growth
//! extrapolation of the last actual FCF.

use crate::config::DcfConfig;
use serde::{Deserialize, Serialize};

/// Fraction of revenue growth applied to the last actual FCF for the year-one floor.
pub const FIRST_YEAR_FLOOR_GROWTH_SHARE: f64 = 0.5;

/// Starting point and growth path for a projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// Most recent historical free cash flow.
    pub last_fcf: f64,
    /// Latest annual revenue.
    pub revenue: f64,
    /// Latest operating margin.
    pub operating_margin: f64,
    /// Annual revenue growth.
    pub revenue_growth: f64,
    /// Margin added each year.
    pub margin_improvement: f64,
    /// Number of years to project.
    pub years: u32,
    /// Market capitalization, used to pick the conversion ratio.
    pub market_cap: f64,
}

/// One projected year.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectedYear {
    /// Year number, starting at 1.
    pub year: u32,
    /// Projected revenue.
    pub revenue: f64,
    /// Projected operating margin after the ceiling.
    pub operating_margin: f64,
    /// Projected operating income.
    pub operating_income: f64,
    /// Projected free cash flow.
    pub free_cash_flow: f64,
}

/// Project the year-by-year path.
pub fn project(inputs: &ProjectionInputs, config: &DcfConfig) -> Vec<ProjectedYear> {
    let conversion = config.conversion_ratio(inputs.market_cap);
    let first_year_floor =
        inputs.last_fcf * (1.0 + inputs.revenue_growth * FIRST_YEAR_FLOOR_GROWTH_SHARE);

    let mut revenue = inputs.revenue;
    let mut margin = inputs.operating_margin;

    (1..=inputs.years)
        .map(|year| {
            revenue *= 1.0 + inputs.revenue_growth;
            margin = (margin + inputs.margin_improvement).min(config.margin_cap);

            let operating_income = revenue * margin;
            let mut free_cash_flow = operating_income * conversion;
            if year == 1 {
                free_cash_flow = free_cash_flow.max(first_year_floor);
            }

            ProjectedYear {
                year,
                revenue,
                operating_margin: margin,
                operating_income,
                free_cash_flow,
            }
        })
        .collect()
}

/// Project free cash flow for each year of the horizon.
pub fn project_cash_flows(inputs: &ProjectionInputs, config: &DcfConfig) -> Vec<f64> {
    project(inputs, config)
        .into_iter()
        .map(|y| y.free_cash_flow)
        .collect()
}
