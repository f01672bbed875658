//! One document with everything ronda knows about a company.

use ronda_dcf::{AssumptionSet, DcfEngine, ScenarioRunner, ScenarioSummary, ValuationResult};
use ronda_ratios::{RatioMap, compute_ratios};
use ronda_traits::{CompanyInfo, FinancialStatements, Outcome, StatementRecord};
use serde::Serialize;

/// Descriptive facts about the company.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Overview {
    /// Company name.
    #[serde(rename = "Name")]
    pub name: Option<String>,
    /// Industry classification.
    #[serde(rename = "Industry")]
    pub industry: Option<String>,
    /// Sector classification.
    #[serde(rename = "Sector")]
    pub sector: Option<String>,
    /// Current share price.
    #[serde(rename = "Current Price")]
    pub current_price: f64,
    /// Market capitalization.
    #[serde(rename = "Market Cap")]
    pub market_cap: f64,
    /// Business description.
    #[serde(rename = "Description")]
    pub description: Option<String>,
}

impl From<&CompanyInfo> for Overview {
    fn from(info: &CompanyInfo) -> Self {
        Self {
            name: info.long_name.clone(),
            industry: info.industry.clone(),
            sector: info.sector.clone(),
            current_price: info.current_price,
            market_cap: info.market_cap,
            description: info.long_business_summary.clone(),
        }
    }
}

/// The three statements as plain records, most recent first.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatementSheets {
    /// Income statement periods.
    #[serde(rename = "Income Statement")]
    pub income_statement: Vec<StatementRecord>,
    /// Balance sheet periods.
    #[serde(rename = "Balance Sheet")]
    pub balance_sheet: Vec<StatementRecord>,
    /// Cash-flow statement periods.
    #[serde(rename = "Cash Flow")]
    pub cash_flow: Vec<StatementRecord>,
}

impl From<&FinancialStatements> for StatementSheets {
    fn from(statements: &FinancialStatements) -> Self {
        Self {
            income_statement: statements.income_statement.records(),
            balance_sheet: statements.balance_sheet.records(),
            cash_flow: statements.cash_flow.records(),
        }
    }
}

/// Overview, statements, ratios, base-case valuation and scenarios for one
/// symbol.
///
/// Each analysis fails independently: a company without cash-flow history
/// still gets its ratios, and one without a balance sheet still gets a
/// valuation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    /// Ticker symbol.
    #[serde(rename = "Symbol")]
    pub symbol: String,
    /// Company overview.
    #[serde(rename = "Company Overview")]
    pub overview: Overview,
    /// The statements the analyses ran on.
    #[serde(rename = "Financial Statements")]
    pub statements: StatementSheets,
    /// Financial ratios.
    #[serde(rename = "Key Metrics")]
    pub ratios: Outcome<RatioMap>,
    /// Base-case valuation.
    #[serde(rename = "Valuation (DCF)")]
    pub valuation: Outcome<ValuationResult>,
    /// Bull, base and bear cases.
    #[serde(rename = "Scenario Analysis")]
    pub scenarios: ScenarioSummary,
}

impl Report {
    /// Run every analysis on one statement bundle.
    ///
    /// The base-case valuation is the base scenario, so the engine runs three
    /// times, not four.
    pub fn build(
        statements: &FinancialStatements,
        assumptions: &AssumptionSet,
        engine: &DcfEngine,
    ) -> Self {
        let scenarios = ScenarioRunner::new(engine.clone()).run(statements, assumptions);
        let valuation = match &scenarios.base {
            Ok(v) => Outcome::Value(v.clone()),
            Err(e) => Outcome::Failure {
                error: e.to_string(),
            },
        };

        Self {
            symbol: statements.symbol.clone(),
            overview: Overview::from(&statements.info),
            statements: StatementSheets::from(statements),
            ratios: compute_ratios(statements).into(),
            valuation,
            scenarios: scenarios.summary(),
        }
    }

    /// Whether any analysis failed.
    pub fn has_failures(&self) -> bool {
        self.ratios.is_failure()
            || self.valuation.is_failure()
            || self
                .scenarios
                .valuation_summary
                .values()
                .any(Outcome::is_failure)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use polars::prelude::*;
    use ronda_traits::StatementTable;

    fn statements() -> FinancialStatements {
        let income = df! {
            "Total Revenue" => &[100_000_000.0],
            "Operating Income" => &[20_000_000.0],
            "Net Income" => &[15_000_000.0],
        }
        .unwrap();
        let balance = df! {
            "Cash And Cash Equivalents" => &[10_000_000.0],
            "Long Term Debt" => &[30_000_000.0],
            "Stockholders Equity" => &[60_000_000.0],
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
                long_name: Some("Acme Corp".to_string()),
                market_cap: 80_000_000.0,
                shares_outstanding: 10_000_000.0,
                current_price: 8.0,
                ..CompanyInfo::default()
            },
        )
    }

    #[test]
    fn test_full_report() {
        let report = Report::build(&statements(), &AssumptionSet::default(), &DcfEngine::default());
        assert!(!report.has_failures());
        assert_eq!(report.overview.name.as_deref(), Some("Acme Corp"));

        let valuation = report.valuation.value().unwrap();
        let base = report.scenarios.valuation_summary["Base"].value().unwrap();
        assert_eq!(valuation.value_per_share, base.value_per_share);
    }

    #[test]
    fn test_failures_are_isolated() {
        let mut data = statements();
        data.cash_flow = StatementTable::empty();
        let report = Report::build(&data, &AssumptionSet::default(), &DcfEngine::default());

        assert!(report.has_failures());
        assert_eq!(
            report.valuation.error(),
            Some("Unable to calculate historical free cash flow")
        );
        assert!(!report.ratios.is_failure());
    }

    #[test]
    fn test_json_sections() {
        let report = Report::build(&statements(), &AssumptionSet::default(), &DcfEngine::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["Symbol"], "ACME");
        assert_eq!(json["Company Overview"]["Name"], "Acme Corp");
        assert_eq!(json["Key Metrics"]["Net Margin"], "15.00%");
        assert!(json["Valuation (DCF)"]["value_per_share"].is_number());
        assert!(json["Scenario Analysis"]["Valuation Summary"]["Bull"].is_object());
    }

    #[test]
    fn test_statements_section() {
        let report = Report::build(&statements(), &AssumptionSet::default(), &DcfEngine::default());
        assert_eq!(report.statements.income_statement.len(), 1);
        assert!(report.statements.cash_flow[0].date.is_none());

        let json = serde_json::to_value(&report).unwrap();
        let sheets = &json["Financial Statements"];
        assert_eq!(sheets["Income Statement"][0]["Net Income"], 15_000_000.0);
        assert_eq!(sheets["Balance Sheet"][0]["Long Term Debt"], 30_000_000.0);
        assert_eq!(sheets["Cash Flow"][0]["Capital Expenditure"], 5_000_000.0);
    }

    #[test]
    fn test_statements_section_keeps_empty_tables() {
        let mut data = statements();
        data.balance_sheet = StatementTable::empty();
        let sheets = StatementSheets::from(&data);
        assert!(sheets.balance_sheet.is_empty());
        assert_eq!(sheets.cash_flow.len(), 1);
    }
}
