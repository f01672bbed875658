//! Scenarios command implementation.

use crate::{
    args::{AssumptionArgs, Target},
    data,
    output::{Output, money, section, signed_percent},
};
use anyhow::Result;
use ronda::dcf::{ScenarioRunner, ScenarioSet};

/// Value each symbol under bull, base and bear assumptions.
pub(crate) async fn run(target: &Target, args: &AssumptionArgs) -> Result<()> {
    let assumptions = args.resolve()?;
    let runner = ScenarioRunner::new(args.engine());
    let mut out = Output::new(target.format, "Scenario Analysis");

    for symbol in &target.symbols {
        let statements = match data::load_statements(symbol, &target.source).await {
            Ok(s) => s,
            Err(e) => {
                out.failure(symbol, &e);
                continue;
            }
        };

        let set = runner.run(&statements, &assumptions);
        if out.is_text() {
            section(&statements.symbol);
            print_scenarios(&set);
        } else {
            out.record(symbol, &set.summary())?;
        }
    }

    out.finish()
}

/// Print the scenario table.
pub(crate) fn print_scenarios(set: &ScenarioSet) {
    println!(
        "{:<6} {:>9} {:>9} {:>14} {:>12} {:>10}",
        "Case", "Discount", "Growth", "Equity Value", "Per Share", "Upside"
    );
    println!("{}", "─".repeat(65));

    for (scenario, result) in set.iter() {
        match result {
            Ok(v) => println!(
                "{:<6} {:>9} {:>9} {:>14} {:>12} {:>10}",
                scenario.name(),
                ronda::traits::format::percent(v.assumptions.discount_rate, 1),
                ronda::traits::format::percent(v.assumptions.revenue_growth, 1),
                money(v.equity_value),
                format!("${:.2}", v.value_per_share),
                signed_percent(v.upside),
            ),
            Err(e) => println!("{:<6} Error: {e}", scenario.name()),
        }
    }
    println!();

    for (name, value) in set.assumption_summary() {
        println!("  {name:<20} {value}");
    }
    println!();
}
