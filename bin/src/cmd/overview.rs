//! Overview command implementation.

use crate::{
    args::Target,
    data,
    output::{Output, money, section},
};
use anyhow::Result;
use ronda::report::Overview;

/// Show descriptive facts for each symbol.
pub(crate) async fn run(target: &Target) -> Result<()> {
    let mut out = Output::new(target.format, "Company Overview");

    for symbol in &target.symbols {
        let statements = match data::load_statements(symbol, &target.source).await {
            Ok(s) => s,
            Err(e) => {
                out.failure(symbol, &e);
                continue;
            }
        };

        let overview = Overview::from(&statements.info);
        if out.is_text() {
            section(&statements.symbol);
            print_overview(&overview);
        } else {
            out.record(symbol, &overview)?;
        }
    }

    out.finish()
}

/// Print the overview block.
pub(crate) fn print_overview(overview: &Overview) {
    let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "n/a".to_string());

    println!("Name:           {}", or_na(&overview.name));
    println!("Industry:       {}", or_na(&overview.industry));
    println!("Sector:         {}", or_na(&overview.sector));
    println!("Current Price:  ${:.2}", overview.current_price);
    println!("Market Cap:     {}", money(overview.market_cap));
    println!();
    if let Some(description) = &overview.description {
        println!("{description}");
        println!();
    }
}
