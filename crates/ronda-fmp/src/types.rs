//! Data types for FMP API responses and their conversion to statement rows.
//!
//! FMP reports each statement as an array of flat camelCase records, most
//! recent first. Each record converts to a [`StatementRecord`] keyed by the
//! line-item names in [`LineItem::synonyms`], so the engines read FMP data
//! through the same lookups as any other source. Fields FMP omits or sends as
//! `null` stay absent rather than becoming zero.

use ronda_traits::{CompanyInfo, FinancialStatements, LineItem, StatementRecord, StatementTable};
use serde::{Deserialize, Serialize};

/// Reporting period for financial statements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    /// Annual reports (10-K filings).
    #[default]
    Annual,
    /// Quarterly reports (10-Q filings).
    Quarter,
}

impl Period {
    /// Get the API parameter value.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Annual => "annual",
            Self::Quarter => "quarter",
        }
    }
}

/// Income statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Total revenue.
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Cost of revenue (COGS).
    #[serde(default)]
    pub cost_of_revenue: Option<f64>,
    /// Gross profit.
    #[serde(default)]
    pub gross_profit: Option<f64>,
    /// Operating income.
    #[serde(default)]
    pub operating_income: Option<f64>,
    /// Net income.
    #[serde(default)]
    pub net_income: Option<f64>,
    /// Earnings per share (diluted).
    #[serde(default)]
    pub eps_diluted: Option<f64>,
    /// Weighted average shares outstanding (diluted).
    #[serde(default)]
    pub weighted_average_shs_out_dil: Option<f64>,
}

impl IncomeStatement {
    /// Convert to a statement row.
    #[must_use]
    pub fn to_record(&self) -> StatementRecord {
        StatementRecord::new(&self.date)
            .with_opt(LineItem::TotalRevenue.canonical_name(), self.revenue)
            .with_opt("Cost Of Revenue", self.cost_of_revenue)
            .with_opt(LineItem::GrossProfit.canonical_name(), self.gross_profit)
            .with_opt(LineItem::OperatingIncome.canonical_name(), self.operating_income)
            .with_opt(LineItem::NetIncome.canonical_name(), self.net_income)
            .with_opt("Diluted EPS", self.eps_diluted)
            .with_opt("Diluted Average Shares", self.weighted_average_shs_out_dil)
    }
}

/// Balance sheet data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSheet {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Total assets.
    #[serde(default)]
    pub total_assets: Option<f64>,
    /// Total current assets.
    #[serde(default)]
    pub total_current_assets: Option<f64>,
    /// Cash and cash equivalents.
    #[serde(default)]
    pub cash_and_cash_equivalents: Option<f64>,
    /// Inventory.
    #[serde(default)]
    pub inventory: Option<f64>,
    /// Total current liabilities.
    #[serde(default)]
    pub total_current_liabilities: Option<f64>,
    /// Short-term debt, including the current portion of long-term debt.
    #[serde(default)]
    pub short_term_debt: Option<f64>,
    /// Long-term debt.
    #[serde(default)]
    pub long_term_debt: Option<f64>,
    /// Non-controlling interest.
    #[serde(default)]
    pub minority_interest: Option<f64>,
    /// Total stockholders' equity.
    #[serde(default)]
    pub total_stockholders_equity: Option<f64>,
    /// Total equity (including non-controlling interests).
    #[serde(default)]
    pub total_equity: Option<f64>,
}

impl BalanceSheet {
    /// Convert to a statement row.
    #[must_use]
    pub fn to_record(&self) -> StatementRecord {
        StatementRecord::new(&self.date)
            .with_opt(LineItem::TotalAssets.canonical_name(), self.total_assets)
            .with_opt(LineItem::CurrentAssets.canonical_name(), self.total_current_assets)
            .with_opt(
                LineItem::CashAndEquivalents.canonical_name(),
                self.cash_and_cash_equivalents,
            )
            .with_opt(LineItem::Inventory.canonical_name(), self.inventory)
            .with_opt(
                LineItem::CurrentLiabilities.canonical_name(),
                self.total_current_liabilities,
            )
            .with_opt(LineItem::ShortTermDebt.canonical_name(), self.short_term_debt)
            .with_opt(LineItem::LongTermDebt.canonical_name(), self.long_term_debt)
            .with_opt(LineItem::MinorityInterest.canonical_name(), self.minority_interest)
            .with_opt(LineItem::TotalEquity.canonical_name(), self.total_equity)
            .with_opt("Stockholders Equity", self.total_stockholders_equity)
    }
}

/// Cash flow statement data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CashFlowStatement {
    /// Period end date.
    pub date: String,
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Operating cash flow.
    #[serde(default)]
    pub operating_cash_flow: Option<f64>,
    /// Capital expenditure, reported by FMP as a negative cash flow.
    #[serde(default)]
    pub capital_expenditure: Option<f64>,
    /// Depreciation and amortization.
    #[serde(default)]
    pub depreciation_and_amortization: Option<f64>,
    /// Free cash flow as reported by FMP.
    #[serde(default)]
    pub free_cash_flow: Option<f64>,
}

impl CashFlowStatement {
    /// Convert to a statement row.
    ///
    /// Capital expenditure is flipped to a positive spend so that free cash
    /// flow is operating cash flow less capex.
    #[must_use]
    pub fn to_record(&self) -> StatementRecord {
        StatementRecord::new(&self.date)
            .with_opt(
                LineItem::OperatingCashFlow.canonical_name(),
                self.operating_cash_flow,
            )
            .with_opt(
                LineItem::CapitalExpenditure.canonical_name(),
                self.capital_expenditure.map(|capex| -capex),
            )
            .with_opt(
                "Depreciation And Amortization",
                self.depreciation_and_amortization,
            )
            .with_opt("Free Cash Flow", self.free_cash_flow)
    }
}

/// Company profile from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyProfile {
    /// Ticker symbol.
    #[serde(default)]
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub company_name: Option<String>,
    /// Industry.
    #[serde(default)]
    pub industry: Option<String>,
    /// Sector.
    #[serde(default)]
    pub sector: Option<String>,
    /// Business description.
    #[serde(default)]
    pub description: Option<String>,
    /// Last price.
    #[serde(default)]
    pub price: Option<f64>,
    /// Market cap.
    #[serde(default, alias = "mktCap")]
    pub market_cap: Option<f64>,
}

/// Real-time quote data from FMP.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Ticker symbol.
    pub symbol: String,
    /// Company name.
    #[serde(default)]
    pub name: String,
    /// Current price.
    pub price: f64,
    /// Market cap.
    #[serde(default)]
    pub market_cap: f64,
    /// Shares outstanding, when the endpoint reports it.
    #[serde(default)]
    pub shares_outstanding: f64,
}

/// Everything fetched for one symbol.
#[derive(Debug, Clone, Default)]
pub struct FundamentalData {
    /// Ticker symbol.
    pub symbol: String,
    /// Income statements (most recent first).
    pub income_statements: Vec<IncomeStatement>,
    /// Balance sheets (most recent first).
    pub balance_sheets: Vec<BalanceSheet>,
    /// Cash flow statements (most recent first).
    pub cash_flows: Vec<CashFlowStatement>,
    /// Company profile.
    pub profile: Option<CompanyProfile>,
    /// Current quote.
    pub quote: Option<Quote>,
}

impl FundamentalData {
    /// Get the most recent income statement.
    #[must_use]
    pub fn latest_income(&self) -> Option<&IncomeStatement> {
        self.income_statements.first()
    }

    /// Current price, preferring the quote over the profile.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.quote
            .as_ref()
            .map(|q| q.price)
            .filter(|p| *p > 0.0)
            .or_else(|| self.profile.as_ref().and_then(|p| p.price))
            .unwrap_or(0.0)
    }

    /// Current market cap, preferring the quote over the profile.
    #[must_use]
    pub fn market_cap(&self) -> f64 {
        self.quote
            .as_ref()
            .map(|q| q.market_cap)
            .filter(|m| *m > 0.0)
            .or_else(|| self.profile.as_ref().and_then(|p| p.market_cap))
            .unwrap_or(0.0)
    }

    /// Shares outstanding.
    ///
    /// Uses the quote's figure when reported, then market cap over price,
    /// then the latest diluted weighted-average share count.
    #[must_use]
    pub fn shares_outstanding(&self) -> f64 {
        if let Some(shares) = self
            .quote
            .as_ref()
            .map(|q| q.shares_outstanding)
            .filter(|s| *s > 0.0)
        {
            return shares;
        }
        let (market_cap, price) = (self.market_cap(), self.price());
        if market_cap > 0.0 && price > 0.0 {
            return market_cap / price;
        }
        self.latest_income()
            .and_then(|i| i.weighted_average_shs_out_dil)
            .unwrap_or(0.0)
    }

    /// The company info record.
    #[must_use]
    pub fn info(&self) -> CompanyInfo {
        let profile = self.profile.clone().unwrap_or_default();
        let long_name = profile.company_name.or_else(|| {
            self.quote
                .as_ref()
                .map(|q| q.name.clone())
                .filter(|n| !n.is_empty())
        });
        CompanyInfo {
            long_name,
            industry: profile.industry,
            sector: profile.sector,
            long_business_summary: profile.description,
            market_cap: self.market_cap(),
            shares_outstanding: self.shares_outstanding(),
            current_price: self.price(),
        }
    }

    /// Assemble the statement bundle the engines consume.
    ///
    /// # Errors
    ///
    /// Returns an error if a statement table cannot be built.
    pub fn into_statements(self) -> ronda_traits::Result<FinancialStatements> {
        let income: Vec<_> = self
            .income_statements
            .iter()
            .map(IncomeStatement::to_record)
            .collect();
        let balance: Vec<_> = self
            .balance_sheets
            .iter()
            .map(BalanceSheet::to_record)
            .collect();
        let cash: Vec<_> = self
            .cash_flows
            .iter()
            .map(CashFlowStatement::to_record)
            .collect();
        let info = self.info();

        Ok(FinancialStatements::new(
            self.symbol,
            StatementTable::from_records(&income)?,
            StatementTable::from_records(&balance)?,
            StatementTable::from_records(&cash)?,
            info,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn sample() -> FundamentalData {
        let income: Vec<IncomeStatement> = serde_json::from_str(
            r#"[
                {"date": "2024-09-28", "symbol": "AAPL", "revenue": 391035000000,
                 "grossProfit": 180683000000, "operatingIncome": 123216000000,
                 "netIncome": 93736000000, "weightedAverageShsOutDil": 15408095000},
                {"date": "2023-09-30", "symbol": "AAPL", "revenue": 383285000000,
                 "netIncome": 96995000000}
            ]"#,
        )
        .unwrap();
        let balance: Vec<BalanceSheet> = serde_json::from_str(
            r#"[{"date": "2024-09-28", "totalAssets": 364980000000,
                 "cashAndCashEquivalents": 29943000000, "shortTermDebt": 20879000000,
                 "longTermDebt": 85750000000, "totalEquity": 56950000000,
                 "totalStockholdersEquity": 56950000000}]"#,
        )
        .unwrap();
        let cash: Vec<CashFlowStatement> = serde_json::from_str(
            r#"[{"date": "2024-09-28", "operatingCashFlow": 118254000000,
                 "capitalExpenditure": -9447000000,
                 "depreciationAndAmortization": 11445000000}]"#,
        )
        .unwrap();
        let profile: CompanyProfile = serde_json::from_str(
            r#"{"symbol": "AAPL", "companyName": "Apple Inc.", "industry": "Consumer Electronics",
                "sector": "Technology", "description": "Designs phones.", "price": 200.0,
                "mktCap": 3000000000000}"#,
        )
        .unwrap();

        FundamentalData {
            symbol: "AAPL".to_string(),
            income_statements: income,
            balance_sheets: balance,
            cash_flows: cash,
            profile: Some(profile),
            quote: None,
        }
    }

    #[test]
    fn test_period_as_str() {
        assert_eq!(Period::Annual.as_str(), "annual");
        assert_eq!(Period::Quarter.as_str(), "quarter");
    }

    #[test]
    fn test_records_use_line_item_names() {
        let data = sample();
        let record = data.income_statements[0].to_record();
        assert_eq!(record.date.as_deref(), Some("2024-09-28"));
        assert_eq!(record.values["Total Revenue"], 391_035_000_000.0);
        assert_eq!(record.values["Operating Income"], 123_216_000_000.0);

        let record = data.balance_sheets[0].to_record();
        assert_eq!(record.values["Total Equity Gross Minority Interest"], 56_950_000_000.0);
        assert!(!record.values.contains_key("Inventory"));
        assert_eq!(record.values["Short Long Term Debt"], 20_879_000_000.0);
        assert_eq!(record.values["Cash And Cash Equivalents"], 29_943_000_000.0);
    }

    #[test]
    fn test_into_statements() {
        let statements = sample().into_statements().unwrap();
        assert_eq!(statements.symbol, "AAPL");
        assert_eq!(statements.income_statement.len(), 2);
        assert_eq!(
            statements.income_statement.value(1, LineItem::NetIncome),
            96_995_000_000.0
        );
        assert_eq!(statements.income_statement.cell(1, "Gross Profit"), None);
        assert_eq!(statements.income_statement.value(1, LineItem::GrossProfit), 0.0);
        assert_eq!(
            statements.cash_flow.value(0, LineItem::CapitalExpenditure),
            9_447_000_000.0
        );
        assert_eq!(statements.info.long_name.as_deref(), Some("Apple Inc."));
        assert_eq!(statements.info.sector.as_deref(), Some("Technology"));
    }

    #[test]
    fn test_shares_from_market_cap() {
        let data = sample();
        assert_relative_eq!(data.market_cap(), 3e12);
        assert_relative_eq!(data.shares_outstanding(), 3e12 / 200.0);
    }

    #[test]
    fn test_quote_takes_precedence() {
        let mut data = sample();
        data.quote = Some(Quote {
            symbol: "AAPL".to_string(),
            name: "Apple Inc.".to_string(),
            price: 250.0,
            market_cap: 3.5e12,
            shares_outstanding: 0.0,
        });
        assert_relative_eq!(data.price(), 250.0);
        assert_relative_eq!(data.market_cap(), 3.5e12);
        assert_relative_eq!(data.shares_outstanding(), 3.5e12 / 250.0);
    }

    #[test]
    fn test_shares_fall_back_to_weighted_average() {
        let mut data = sample();
        data.profile = None;
        assert_relative_eq!(data.shares_outstanding(), 15_408_095_000.0);
        assert_eq!(data.info().long_name, None);
    }

    #[test]
    fn test_omitted_total_equity_falls_back_to_stockholders_equity() {
        let balance: Vec<BalanceSheet> = serde_json::from_str(
            r#"[{"date": "2024-12-31", "totalStockholdersEquity": 50.0}]"#,
        )
        .unwrap();
        let table = StatementTable::from_records(&[balance[0].to_record()]).unwrap();

        assert_eq!(table.cell(0, "Total Equity Gross Minority Interest"), None);
        assert_relative_eq!(table.value(0, LineItem::TotalEquity), 50.0);
    }

    #[test]
    fn test_null_fields_are_absent() {
        let balance: Vec<BalanceSheet> = serde_json::from_str(
            r#"[{"date": "2024-12-31", "inventory": null, "totalAssets": 100.0}]"#,
        )
        .unwrap();
        assert_eq!(balance[0].inventory, None);

        let record = balance[0].to_record();
        assert!(!record.values.contains_key("Inventory"));
        assert_eq!(record.values["Total Assets"], 100.0);
    }

    #[test]
    fn test_capex_becomes_a_positive_spend() {
        let cash: Vec<CashFlowStatement> = serde_json::from_str(
            r#"[{"date": "2024-12-31", "operatingCashFlow": 25.0, "capitalExpenditure": -5.0}]"#,
        )
        .unwrap();
        let record = cash[0].to_record();
        assert_eq!(record.values["Capital Expenditure"], 5.0);
        assert!(!record.values.contains_key("Free Cash Flow"));
    }
}
