//! FMP API client implementation.

use crate::{
    Result,
    error::FmpError,
    types::{
        BalanceSheet, CashFlowStatement, CompanyProfile, FundamentalData, IncomeStatement, Period,
        Quote,
    },
};
use reqwest::Client;
use ronda_traits::{FinancialStatements, StatementProvider};
use std::env;

/// Base URL for the FMP stable API.
const FMP_BASE_URL: &str = "https://financialmodelingprep.com/stable";

/// Statement periods fetched when none is configured.
pub const DEFAULT_PERIODS: u32 = 4;

/// Financial Modeling Prep API client.
#[derive(Debug, Clone)]
pub struct FmpClient {
    client: Client,
    api_key: String,
    periods: u32,
}

impl FmpClient {
    /// Create a new FMP client with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            periods: DEFAULT_PERIODS,
        }
    }

    /// Create a new FMP client from the `FMP_API_KEY` environment variable.
    ///
    /// This will also load from a `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set.
    pub fn from_env() -> Result<Self> {
        // A missing .env file is fine
        let _ = dotenvy::dotenv();

        let api_key = env::var("FMP_API_KEY").map_err(|_| FmpError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Set the number of annual periods fetched per statement.
    #[must_use]
    pub const fn with_periods(mut self, periods: u32) -> Self {
        self.periods = periods;
        self
    }

    /// Number of annual periods fetched per statement.
    #[must_use]
    pub const fn periods(&self) -> u32 {
        self.periods
    }

    /// Build a URL with the API key.
    fn url(&self, endpoint: &str) -> String {
        if endpoint.contains('?') {
            format!("{FMP_BASE_URL}/{endpoint}&apikey={}", self.api_key)
        } else {
            format!("{FMP_BASE_URL}/{endpoint}?apikey={}", self.api_key)
        }
    }

    /// Endpoint path for a statement query.
    fn statement_endpoint(
        statement: &str,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> String {
        let limit_param = limit.map(|l| format!("&limit={l}")).unwrap_or_default();
        format!(
            "{statement}?symbol={}&period={}{limit_param}",
            symbol.to_uppercase(),
            period.as_str(),
        )
    }

    /// Make a GET request and parse the JSON response.
    async fn get<T: serde::de::DeserializeOwned>(&self, endpoint: &str) -> Result<T> {
        let url = self.url(endpoint);
        tracing::debug!(endpoint, "fmp request");
        let response = self.client.get(&url).send().await?;

        if response.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(FmpError::RateLimitExceeded);
        }

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            return Err(FmpError::Api(format!("HTTP {status}: {text}")));
        }

        let text = response.text().await?;

        // FMP reports some failures with a 200 status
        if text.contains("\"Error Message\"") || text.contains("\"error\"") {
            return Err(FmpError::Api(text));
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Get income statements for a symbol.
    ///
    /// # Arguments
    ///
    /// * `symbol` - Stock ticker symbol (e.g., "AAPL")
    /// * `period` - Annual or quarterly
    /// * `limit` - Number of periods to return (most recent first)
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn income_statement(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<IncomeStatement>> {
        self.get(&Self::statement_endpoint("income-statement", symbol, period, limit))
            .await
    }

    /// Get balance sheets for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn balance_sheet(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<BalanceSheet>> {
        self.get(&Self::statement_endpoint(
            "balance-sheet-statement",
            symbol,
            period,
            limit,
        ))
        .await
    }

    /// Get cash flow statements for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn cash_flow(
        &self,
        symbol: &str,
        period: Period,
        limit: Option<u32>,
    ) -> Result<Vec<CashFlowStatement>> {
        self.get(&Self::statement_endpoint(
            "cash-flow-statement",
            symbol,
            period,
            limit,
        ))
        .await
    }

    /// Get the company profile for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the symbol is unknown.
    pub async fn profile(&self, symbol: &str) -> Result<CompanyProfile> {
        let endpoint = format!("profile?symbol={}", symbol.to_uppercase());
        let profiles: Vec<CompanyProfile> = self.get(&endpoint).await?;
        profiles
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get real-time quote for a symbol.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let endpoint = format!("quote?symbol={}", symbol.to_uppercase());
        let quotes: Vec<Quote> = self.get(&endpoint).await?;
        quotes
            .into_iter()
            .next()
            .ok_or_else(|| FmpError::SymbolNotFound(symbol.to_string()))
    }

    /// Get statements, profile and quote for a symbol.
    ///
    /// The five requests run concurrently. A failed statement request leaves
    /// that statement empty and a failed profile or quote leaves it unset, so
    /// downstream engines can degrade instead of aborting. The call fails only
    /// when nothing at all could be fetched.
    ///
    /// # Errors
    ///
    /// Returns the income-statement error if every request fails.
    pub async fn fundamental_data(&self, symbol: &str, periods: u32) -> Result<FundamentalData> {
        let (income, balance, cash, profile, quote) = tokio::join!(
            self.income_statement(symbol, Period::Annual, Some(periods)),
            self.balance_sheet(symbol, Period::Annual, Some(periods)),
            self.cash_flow(symbol, Period::Annual, Some(periods)),
            self.profile(symbol),
            self.quote(symbol),
        );

        let nothing_fetched = income.is_err()
            && balance.is_err()
            && cash.is_err()
            && profile.is_err()
            && quote.is_err();
        if nothing_fetched && let Err(e) = income {
            return Err(e);
        }

        Ok(FundamentalData {
            symbol: symbol.to_uppercase(),
            income_statements: logged(symbol, "income statement", income).unwrap_or_default(),
            balance_sheets: logged(symbol, "balance sheet", balance).unwrap_or_default(),
            cash_flows: logged(symbol, "cash flow", cash).unwrap_or_default(),
            profile: logged(symbol, "profile", profile),
            quote: logged(symbol, "quote", quote),
        })
    }
}

/// Log a failed request and keep going without its data.
fn logged<T>(symbol: &str, what: &str, result: Result<T>) -> Option<T> {
    match result {
        Ok(v) => Some(v),
        Err(e) => {
            tracing::warn!(symbol, what, error = %e, "fmp request failed");
            None
        }
    }
}

impl StatementProvider for FmpClient {
    fn name(&self) -> &str {
        "fmp"
    }

    async fn fetch(&self, symbol: &str) -> ronda_traits::Result<FinancialStatements> {
        let data = self.fundamental_data(symbol, self.periods).await?;
        data.into_statements()
    }
}
