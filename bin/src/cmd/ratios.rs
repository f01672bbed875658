//! Ratios command implementation.

use crate::{
    args::Target,
    data,
    output::{Output, section},
};
use anyhow::Result;
use ronda::{
    Outcome,
    ratios::{RatioCategory, RatioMap, compute_ratios},
};

/// Category headings in display order.
const CATEGORIES: [(RatioCategory, &str); 5] = [
    (RatioCategory::Profitability, "Profitability"),
    (RatioCategory::Liquidity, "Liquidity"),
    (RatioCategory::Leverage, "Leverage"),
    (RatioCategory::Valuation, "Valuation"),
    (RatioCategory::Growth, "Growth"),
];

/// Show the ratio table for each symbol.
pub(crate) async fn run(target: &Target) -> Result<()> {
    let mut out = Output::new(target.format, "Key Metrics");

    for symbol in &target.symbols {
        let statements = match data::load_statements(symbol, &target.source).await {
            Ok(s) => s,
            Err(e) => {
                out.failure(symbol, &e);
                continue;
            }
        };

        let ratios = compute_ratios(&statements);
        if out.is_text() {
            match &ratios {
                Ok(map) => {
                    section(&statements.symbol);
                    print_ratios(map);
                }
                Err(e) => out.failure(symbol, e),
            }
        } else {
            out.record(symbol, &Outcome::from(ratios))?;
        }
    }

    out.finish()
}

/// Print computed ratios grouped by category.
pub(crate) fn print_ratios(ratios: &RatioMap) {
    if ratios.is_empty() {
        println!("No ratios could be computed from the available data.\n");
        return;
    }

    for (category, heading) in CATEGORIES {
        let rows: Vec<_> = ratios.in_category(category).collect();
        if rows.is_empty() {
            continue;
        }
        println!("{heading}:");
        for (ratio, value) in rows {
            println!("  {:<26} {:>12}", ratio.name(), ratio.format().render(value));
        }
        println!();
    }
}
