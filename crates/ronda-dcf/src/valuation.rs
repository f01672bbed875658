//! Valuation output.

use crate::{AssumptionSet, Methodology, projection::ProjectedYear};
use serde::{Deserialize, Serialize};

/// The outcome of one DCF valuation.
///
/// One instance exists per (assumption set, statement snapshot) pair; it is
/// never mutated after the engine builds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationResult {
    /// Present value of projected flows plus discounted terminal value.
    pub enterprise_value: f64,
    /// Enterprise value bridged to equity holders.
    pub equity_value: f64,
    /// Equity value per share outstanding.
    pub value_per_share: f64,
    /// Market price the valuation is compared against.
    pub current_price: f64,
    /// `(value_per_share - current_price) / current_price`.
    pub upside: f64,
    /// Projected free cash flow, year 1 first.
    pub projected_fcf: Vec<f64>,
    /// Undiscounted terminal value at the end of the horizon.
    pub terminal_value: f64,
    /// Sum of the discounted projected flows.
    pub pv_projected_fcf: f64,
    /// Terminal value discounted to today.
    pub pv_terminal_value: f64,
    /// Historical free cash flow, oldest first.
    pub historical_fcf: Vec<f64>,
    /// Full projected path (revenue, margin, operating income, FCF).
    pub projection: Vec<ProjectedYear>,
    /// Assumptions actually used, after any mega-cap floors.
    pub assumptions: AssumptionSet,
    /// Formula variant used.
    pub methodology: Methodology,
}

impl ValuationResult {
    /// Share of enterprise value coming from the terminal value.
    #[must_use]
    pub fn terminal_value_share(&self) -> f64 {
        if self.enterprise_value == 0.0 {
            0.0
        } else {
            self.pv_terminal_value / self.enterprise_value
        }
    }

    /// Whether the intrinsic value sits above the market price.
    #[must_use]
    pub fn is_undervalued(&self) -> bool {
        self.upside > 0.0
    }
}
