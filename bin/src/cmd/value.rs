//! Value command implementation.

use crate::{
    args::{AssumptionArgs, Target},
    data,
    output::{Output, money, section, signed_percent},
};
use anyhow::Result;
use ronda::{FinancialStatements, Outcome, ValuationResult, traits::format};

/// Value each symbol under the base-case assumptions.
pub(crate) async fn run(target: &Target, args: &AssumptionArgs) -> Result<()> {
    let assumptions = args.resolve()?;
    let engine = args.engine();
    let mut out = Output::new(target.format, "DCF Valuation");

    for symbol in &target.symbols {
        let statements = match data::load_statements(symbol, &target.source).await {
            Ok(s) => s,
            Err(e) => {
                out.failure(symbol, &e);
                continue;
            }
        };

        let result = engine.value(&statements, &assumptions);
        if out.is_text() {
            match &result {
                Ok(valuation) => print_valuation(&statements, valuation),
                Err(e) => out.failure(symbol, e),
            }
        } else {
            out.record(symbol, &Outcome::from(result))?;
        }
    }

    out.finish()
}

/// Print one valuation as text.
pub(crate) fn print_valuation(statements: &FinancialStatements, v: &ValuationResult) {
    let name = statements.info.long_name.as_deref().unwrap_or("");
    section(&format!("{}  {}", statements.symbol, name));

    println!("Methodology:        {}", v.methodology.as_str());
    let history: Vec<String> = v.historical_fcf.iter().map(|f| money(*f)).collect();
    println!("Historical FCF:     {}", history.join(", "));
    println!();

    println!(
        "{:<6} {:>12} {:>8} {:>12} {:>12}",
        "Year", "Revenue", "Margin", "FCF", "PV of FCF"
    );
    println!("{}", "─".repeat(54));
    for year in &v.projection {
        let pv = ronda::dcf::engine::present_value(
            year.free_cash_flow,
            v.assumptions.discount_rate,
            year.year,
        );
        println!(
            "{:<6} {:>12} {:>8} {:>12} {:>12}",
            year.year,
            money(year.revenue),
            format::percent(year.operating_margin, 1),
            money(year.free_cash_flow),
            money(pv),
        );
    }
    println!();

    println!("Terminal Value:     {}", money(v.terminal_value));
    println!("PV of Projected:    {}", money(v.pv_projected_fcf));
    println!(
        "PV of Terminal:     {} ({} of EV)",
        money(v.pv_terminal_value),
        format::percent(v.terminal_value_share(), 1)
    );
    println!("Enterprise Value:   {}", money(v.enterprise_value));
    println!("Equity Value:       {}", money(v.equity_value));
    println!("Value per Share:    ${:.2}", v.value_per_share);
    println!("Current Price:      ${:.2}", v.current_price);
    println!("Upside / Downside:  {}", signed_percent(v.upside));
    println!();

    println!("Assumptions:");
    for (name, value) in v.assumptions.summary() {
        println!("  {name:<20} {value}");
    }
    println!();
}
