//! Valuation assumptions.

use crate::config::DcfConfig;
use ronda_traits::{Result, RondaError, format};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Inputs a DCF valuation is run under.
///
/// All rates are fractions (`0.10` is 10%).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssumptionSet {
    /// Discount rate (WACC) (default: 0.10)
    pub discount_rate: f64,

    /// Perpetual growth rate after the projection horizon (default: 0.025)
    pub terminal_growth: f64,

    /// Number of explicitly projected years (default: 5)
    pub projection_years: u32,

    /// Annual revenue growth over the horizon (default: 0.05)
    pub revenue_growth: f64,

    /// Operating margin added each projected year (default: 0.005)
    pub margin_improvement: f64,
}

impl Default for AssumptionSet {
    fn default() -> Self {
        Self {
            discount_rate: 0.10,
            terminal_growth: 0.025,
            projection_years: 5,
            revenue_growth: 0.05,
            margin_improvement: 0.005,
        }
    }
}

impl AssumptionSet {
    /// Check the assumptions can produce a finite valuation.
    ///
    /// # Errors
    ///
    /// Returns [`RondaError::InvalidAssumption`] for a zero horizon or a
    /// non-finite rate, and [`RondaError::InvalidTerminalValue`] when the
    /// discount rate does not exceed terminal growth.
    pub fn validate(&self) -> Result<()> {
        if self.projection_years == 0 {
            return Err(RondaError::InvalidAssumption(
                "projection horizon must be at least one year".to_string(),
            ));
        }

        let rates = [
            ("discount rate", self.discount_rate),
            ("terminal growth", self.terminal_growth),
            ("revenue growth", self.revenue_growth),
            ("margin improvement", self.margin_improvement),
        ];
        if let Some((name, value)) = rates.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RondaError::InvalidAssumption(format!(
                "{name} must be finite, got {value}"
            )));
        }

        if self.discount_rate <= self.terminal_growth {
            return Err(RondaError::InvalidTerminalValue {
                discount_rate: self.discount_rate,
                terminal_growth: self.terminal_growth,
            });
        }

        Ok(())
    }

    /// Apply the mega-cap floors for a company of the given size.
    ///
    /// Discount rate and terminal growth are each raised to their floor when
    /// below it and left alone otherwise. Returns the assumptions unchanged
    /// when the configuration does not apply floors to this company.
    #[must_use]
    pub fn with_mega_cap_floors(mut self, market_cap: f64, config: &DcfConfig) -> Self {
        if config.applies_mega_cap_floors(market_cap) {
            self.discount_rate = self.discount_rate.max(config.mega_cap_discount_floor);
            self.terminal_growth = self.terminal_growth.max(config.mega_cap_terminal_floor);
        }
        self
    }

    /// Shift discount rate and revenue growth, holding everything else.
    #[must_use]
    pub fn shifted(mut self, discount_delta: f64, growth_delta: f64) -> Self {
        self.discount_rate += discount_delta;
        self.revenue_growth += growth_delta;
        self
    }

    /// Human-readable echo of the assumptions.
    ///
    /// Rates are rendered as percentages with one decimal.
    #[must_use]
    pub fn summary(&self) -> BTreeMap<&'static str, String> {
        let mut out = self.shared_summary();
        out.insert("Discount Rate", format::percent(self.discount_rate, 1));
        out.insert("Revenue Growth", format::percent(self.revenue_growth, 1));
        out
    }

    /// Echo of the assumptions that do not vary between scenarios.
    #[must_use]
    pub fn shared_summary(&self) -> BTreeMap<&'static str, String> {
        BTreeMap::from([
            ("Terminal Growth", format::percent(self.terminal_growth, 1)),
            (
                "Margin Improvement",
                format::percent(self.margin_improvement, 1),
            ),
            ("Projection Years", self.projection_years.to_string()),
        ])
    }
}
