//! Bull, base and bear scenarios around one set of assumptions.

use crate::{AssumptionSet, DcfEngine, ValuationResult};
use ronda_traits::{FinancialStatements, Outcome, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Discount-rate shift between adjacent scenarios (one percentage point).
pub const DISCOUNT_RATE_STEP: f64 = 0.01;

/// Revenue-growth shift between adjacent scenarios (two percentage points).
pub const REVENUE_GROWTH_STEP: f64 = 0.02;

/// A valuation scenario.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Scenario {
    /// Lower discount rate, faster growth.
    Bull,
    /// The assumptions as given.
    Base,
    /// Higher discount rate, slower growth.
    Bear,
}

impl Scenario {
    /// All scenarios, most optimistic first.
    pub const ALL: [Self; 3] = [Self::Bull, Self::Base, Self::Bear];

    /// Display name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Bull => "Bull",
            Self::Base => "Base",
            Self::Bear => "Bear",
        }
    }

    /// Derive this scenario's assumptions from the base case.
    ///
    /// Terminal growth, margin improvement and horizon are left unchanged.
    #[must_use]
    pub fn apply(&self, base: &AssumptionSet) -> AssumptionSet {
        match self {
            Self::Bull => base.shifted(-DISCOUNT_RATE_STEP, REVENUE_GROWTH_STEP),
            Self::Base => *base,
            Self::Bear => base.shifted(DISCOUNT_RATE_STEP, -REVENUE_GROWTH_STEP),
        }
    }
}

/// Results of the three scenarios.
///
/// Each scenario keeps its own `Result`, so a failure in one case (for
/// example a bull discount rate that falls to terminal growth) leaves the
/// others usable.
#[derive(Debug)]
pub struct ScenarioSet {
    /// Base-case assumptions the scenarios were derived from.
    pub base_assumptions: AssumptionSet,
    /// Bull case.
    pub bull: Result<ValuationResult>,
    /// Base case.
    pub base: Result<ValuationResult>,
    /// Bear case.
    pub bear: Result<ValuationResult>,
}

impl ScenarioSet {
    /// The result for one scenario.
    pub const fn get(&self, scenario: Scenario) -> &Result<ValuationResult> {
        match scenario {
            Scenario::Bull => &self.bull,
            Scenario::Base => &self.base,
            Scenario::Bear => &self.bear,
        }
    }

    /// Iterate scenarios with their results, bull first.
    pub fn iter(&self) -> impl Iterator<Item = (Scenario, &Result<ValuationResult>)> {
        Scenario::ALL.into_iter().map(move |s| (s, self.get(s)))
    }

    /// Whether every scenario produced a valuation.
    pub fn all_ok(&self) -> bool {
        self.iter().all(|(_, r)| r.is_ok())
    }

    /// Echo of the assumptions shared by all scenarios.
    pub fn assumption_summary(&self) -> BTreeMap<&'static str, String> {
        self.base_assumptions.shared_summary()
    }

    /// Plain-data view for the presentation layer.
    pub fn summary(&self) -> ScenarioSummary {
        ScenarioSummary {
            valuation_summary: self
                .iter()
                .map(|(s, r)| {
                    let outcome = match r {
                        Ok(v) => Outcome::Value(ValuationSummary::from(v)),
                        Err(e) => Outcome::Failure {
                            error: e.to_string(),
                        },
                    };
                    (s.name(), outcome)
                })
                .collect(),
            assumptions: self.assumption_summary(),
        }
    }
}

/// Headline figures of one valuation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ValuationSummary {
    /// Enterprise value.
    #[serde(rename = "Enterprise Value")]
    pub enterprise_value: f64,
    /// Equity value.
    #[serde(rename = "Equity Value")]
    pub equity_value: f64,
    /// Value per share.
    #[serde(rename = "Value per Share")]
    pub value_per_share: f64,
    /// Current price.
    #[serde(rename = "Current Price")]
    pub current_price: f64,
    /// Upside or downside fraction.
    #[serde(rename = "Upside / Downside")]
    pub upside: f64,
}

impl From<&ValuationResult> for ValuationSummary {
    fn from(r: &ValuationResult) -> Self {
        Self {
            enterprise_value: r.enterprise_value,
            equity_value: r.equity_value,
            value_per_share: r.value_per_share,
            current_price: r.current_price,
            upside: r.upside,
        }
    }
}

/// Serializable scenario overview: per-scenario headline figures or error,
/// plus the shared assumptions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioSummary {
    /// Headline figures per scenario name.
    #[serde(rename = "Valuation Summary")]
    pub valuation_summary: BTreeMap<&'static str, Outcome<ValuationSummary>>,
    /// Shared assumptions, formatted.
    #[serde(rename = "Assumptions")]
    pub assumptions: BTreeMap<&'static str, String>,
}

/// Runs the engine once per scenario.
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: DcfEngine,
}

impl ScenarioRunner {
    /// Create a runner around an engine.
    #[must_use]
    pub const fn new(engine: DcfEngine) -> Self {
        Self { engine }
    }

    /// The engine used for every scenario.
    #[must_use]
    pub const fn engine(&self) -> &DcfEngine {
        &self.engine
    }

    /// Value the company under the bull, base and bear assumptions.
    ///
    /// The runs share no mutable state and are evaluated in parallel.
    pub fn run(&self, statements: &FinancialStatements, base: &AssumptionSet) -> ScenarioSet {
        let (bull, (base_result, bear)) = rayon::join(
            || self.run_one(statements, base, Scenario::Bull),
            || {
                rayon::join(
                    || self.run_one(statements, base, Scenario::Base),
                    || self.run_one(statements, base, Scenario::Bear),
                )
            },
        );

        ScenarioSet {
            base_assumptions: *base,
            bull,
            base: base_result,
            bear,
        }
    }

    /// Value the company under a single scenario.
    ///
    /// # Errors
    ///
    /// See [`DcfEngine::value`].
    pub fn run_one(
        &self,
        statements: &FinancialStatements,
        base: &AssumptionSet,
        scenario: Scenario,
    ) -> Result<ValuationResult> {
        let assumptions = scenario.apply(base);
        let result = self.engine.value(statements, &assumptions);
        if let Err(e) = &result {
            tracing::warn!(
                symbol = %statements.symbol,
                scenario = scenario.name(),
                error = %e,
                "scenario valuation failed"
            );
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_scenario_shifts() {
        let base = AssumptionSet::default();

        let bull = Scenario::Bull.apply(&base);
        assert_relative_eq!(bull.discount_rate, 0.09, epsilon = 1e-12);
        assert_relative_eq!(bull.revenue_growth, 0.07, epsilon = 1e-12);

        let bear = Scenario::Bear.apply(&base);
        assert_relative_eq!(bear.discount_rate, 0.11, epsilon = 1e-12);
        assert_relative_eq!(bear.revenue_growth, 0.03, epsilon = 1e-12);

        assert_eq!(Scenario::Base.apply(&base), base);
    }

    #[test]
    fn test_fixed_assumptions_are_held() {
        let base = AssumptionSet {
            terminal_growth: 0.02,
            margin_improvement: 0.01,
            projection_years: 7,
            ..AssumptionSet::default()
        };
        for scenario in Scenario::ALL {
            let a = scenario.apply(&base);
            assert_relative_eq!(a.terminal_growth, 0.02);
            assert_relative_eq!(a.margin_improvement, 0.01);
            assert_eq!(a.projection_years, 7);
        }
    }

    #[test]
    fn test_scenario_names() {
        let names: Vec<_> = Scenario::ALL.iter().map(Scenario::name).collect();
        assert_eq!(names, vec!["Bull", "Base", "Bear"]);
    }

    fn statements() -> FinancialStatements {
        use polars::prelude::*;
        use ronda_traits::{CompanyInfo, StatementTable};

        let income = df! {
            "Total Revenue" => &[100_000_000.0],
            "Operating Income" => &[20_000_000.0],
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
            StatementTable::empty(),
            StatementTable::new(cash_flow),
            CompanyInfo {
                shares_outstanding: 10_000_000.0,
                current_price: 20.0,
                ..CompanyInfo::default()
            },
        )
    }

    #[test]
    fn test_bull_base_bear_ordering() {
        let set = ScenarioRunner::default().run(&statements(), &AssumptionSet::default());
        assert!(set.all_ok());

        let value = |r: &Result<ValuationResult>| r.as_ref().unwrap().value_per_share;
        assert!(value(&set.bull) >= value(&set.base));
        assert!(value(&set.base) >= value(&set.bear));
    }

    #[test]
    fn test_base_matches_single_run() {
        let data = statements();
        let runner = ScenarioRunner::default();
        let set = runner.run(&data, &AssumptionSet::default());
        let single = runner.engine().value(&data, &AssumptionSet::default()).unwrap();
        assert_eq!(set.base.as_ref().unwrap(), &single);
    }

    #[test]
    fn test_failing_scenario_is_isolated() {
        // Bull drops the discount rate to 3%, equal to terminal growth.
        let base = AssumptionSet {
            discount_rate: 0.04,
            terminal_growth: 0.03,
            ..AssumptionSet::default()
        };
        let set = ScenarioRunner::default().run(&statements(), &base);
        assert!(set.bull.is_err());
        assert!(set.base.is_ok());
        assert!(set.bear.is_ok());

        let summary = set.summary();
        assert!(summary.valuation_summary["Bull"].is_failure());
        assert!(!summary.valuation_summary["Bear"].is_failure());
    }

    #[test]
    fn test_summary_json_shape() {
        let set = ScenarioRunner::default().run(&statements(), &AssumptionSet::default());
        let json = serde_json::to_value(set.summary()).unwrap();

        let base = &json["Valuation Summary"]["Base"];
        assert!(base["Value per Share"].is_number());
        assert!(base["Upside / Downside"].is_number());
        assert_eq!(json["Assumptions"]["Terminal Growth"], "2.5%");
        assert_eq!(json["Assumptions"]["Projection Years"], "5");
    }
}
