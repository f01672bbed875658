//! Statements command implementation.

use crate::{
    args::Target,
    data,
    output::{Output, section},
};
use anyhow::Result;
use ronda::{FinancialStatements, StatementTable, report::StatementSheets};

/// Show the raw income statement, balance sheet and cash flow for each symbol.
pub(crate) async fn run(target: &Target) -> Result<()> {
    let mut out = Output::new(target.format, "Financial Statements");

    for symbol in &target.symbols {
        let statements = match data::load_statements(symbol, &target.source).await {
            Ok(s) => s,
            Err(e) => {
                out.failure(symbol, &e);
                continue;
            }
        };

        if out.is_text() {
            section(&statements.symbol);
            print_statements(&statements);
        } else {
            out.record(symbol, &StatementSheets::from(&statements))?;
        }
    }

    out.finish()
}

/// Print each statement as a table, most recent period first.
pub(crate) fn print_statements(statements: &FinancialStatements) {
    print_table("Income Statement", &statements.income_statement);
    print_table("Balance Sheet", &statements.balance_sheet);
    print_table("Cash Flow", &statements.cash_flow);
}

fn print_table(title: &str, table: &StatementTable) {
    println!("{title}");
    if table.is_empty() {
        println!("  (no data)\n");
    } else {
        println!("{}\n", table.data());
    }
}
