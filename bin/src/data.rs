//! Statement loading for the ronda CLI.

use crate::args::SourceArgs;
use ronda::{FinancialStatements, Result, SnapshotStore, StatementProvider, fmp::FmpClient};

/// Load statements for a symbol.
///
/// Reads the snapshot given by `--input` when present and otherwise queries
/// FMP with the key from `FMP_API_KEY`.
pub(crate) async fn load_statements(
    symbol: &str,
    source: &SourceArgs,
) -> Result<FinancialStatements> {
    match &source.input {
        Some(path) => fetch(&SnapshotStore::new(path), symbol).await,
        None => {
            let client = FmpClient::from_env()?.with_periods(source.periods);
            fetch(&client, symbol).await
        }
    }
}

async fn fetch<P: StatementProvider>(provider: &P, symbol: &str) -> Result<FinancialStatements> {
    tracing::debug!(provider = provider.name(), symbol, "loading statements");
    let statements = provider.fetch(symbol).await?;
    tracing::debug!(
        symbol,
        income_rows = statements.income_statement.len(),
        balance_rows = statements.balance_sheet.len(),
        cash_flow_rows = statements.cash_flow.len(),
        "statements loaded"
    );
    Ok(statements)
}
