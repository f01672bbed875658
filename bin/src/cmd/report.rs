//! Report command implementation.

use crate::{
    args::{AssumptionArgs, Target},
    cmd::{overview, ratios, scenarios, statements as sheets, value},
    data,
    output::{Output, banner},
};
use anyhow::Result;
use ronda::{
    dcf::ScenarioRunner,
    ratios::compute_ratios,
    report::{Overview, Report},
};

/// Print overview, statements, ratios, valuation and scenarios for each symbol.
pub(crate) async fn run(target: &Target, args: &AssumptionArgs) -> Result<()> {
    let assumptions = args.resolve()?;
    let engine = args.engine();
    let mut out = Output::new(target.format, "Equity Research Report");

    for symbol in &target.symbols {
        let statements = match data::load_statements(symbol, &target.source).await {
            Ok(s) => s,
            Err(e) => {
                out.failure(symbol, &e);
                continue;
            }
        };

        if !out.is_text() {
            out.record(symbol, &Report::build(&statements, &assumptions, &engine))?;
            continue;
        }

        banner(&format!("{} Company Overview", statements.symbol));
        overview::print_overview(&Overview::from(&statements.info));

        banner("Financial Statements");
        sheets::print_statements(&statements);

        banner("Key Metrics");
        match compute_ratios(&statements) {
            Ok(map) => ratios::print_ratios(&map),
            Err(e) => println!("Error: {e}\n"),
        }

        let set = ScenarioRunner::new(engine.clone()).run(&statements, &assumptions);

        banner("Valuation (DCF)");
        match &set.base {
            Ok(v) => value::print_valuation(&statements, v),
            Err(e) => println!("Error: {e}\n"),
        }

        banner("Scenario Analysis");
        scenarios::print_scenarios(&set);
    }

    out.finish()
}
