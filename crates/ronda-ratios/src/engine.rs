//! Ratio computation from the latest and prior statement rows.

use crate::{Ratio, RatioMap};
use ronda_traits::{FinancialStatements, LineItem, Result, RondaError, StatementRow};

/// Compute every ratio the statements support.
///
/// Reads the latest income-statement and balance-sheet rows. Growth ratios
/// also need the prior row of the statement they compare: income growth uses
/// the prior income row, balance growth the prior balance row. A missing
/// prior row only disables the ratios that depend on it.
///
/// # Errors
///
/// Returns [`RondaError::MissingStatement`] when the income statement or the
/// balance sheet has no rows.
pub fn compute_ratios(statements: &FinancialStatements) -> Result<RatioMap> {
    let income = statements
        .income_statement
        .latest()
        .ok_or_else(|| RondaError::MissingStatement("income statement".to_string()))?;
    let balance = statements
        .balance_sheet
        .latest()
        .ok_or_else(|| RondaError::MissingStatement("balance sheet".to_string()))?;

    let mut ratios = RatioMap::new();

    let revenue = income.get(LineItem::TotalRevenue);
    let net_income = income.get(LineItem::NetIncome);
    let total_assets = balance.get(LineItem::TotalAssets);
    let total_equity = balance.get(LineItem::TotalEquity);

    // Profitability
    if revenue != 0.0 {
        ratios.insert(Ratio::GrossMargin, income.get(LineItem::GrossProfit) / revenue);
        ratios.insert(
            Ratio::OperatingMargin,
            income.get(LineItem::OperatingIncome) / revenue,
        );
        ratios.insert(Ratio::NetMargin, net_income / revenue);
    }
    if total_equity != 0.0 {
        ratios.insert(Ratio::ReturnOnEquity, net_income / total_equity);
    }
    if total_assets != 0.0 {
        ratios.insert(Ratio::ReturnOnAssets, net_income / total_assets);
    }

    // Liquidity
    let current_assets = balance.get(LineItem::CurrentAssets);
    let current_liabilities = balance.get(LineItem::CurrentLiabilities);
    if current_liabilities != 0.0 {
        ratios.insert(Ratio::CurrentRatio, current_assets / current_liabilities);
        ratios.insert(
            Ratio::QuickRatio,
            (current_assets - balance.get(LineItem::Inventory)) / current_liabilities,
        );
    }

    // Leverage
    if total_equity != 0.0 {
        let total_debt = balance.get(LineItem::ShortTermDebt) + balance.get(LineItem::LongTermDebt);
        ratios.insert(Ratio::DebtToEquity, total_debt / total_equity);
    }

    // Valuation
    let shares = statements.info.shares_outstanding;
    let price = statements.info.current_price;
    let eps = (shares != 0.0).then(|| net_income / shares);
    if shares != 0.0 {
        if let Some(eps) = eps.filter(|e| *e != 0.0) {
            ratios.insert(Ratio::PriceToEarnings, price / eps);
        }
        let book_value_per_share = total_equity / shares;
        if book_value_per_share != 0.0 {
            ratios.insert(Ratio::PriceToBook, price / book_value_per_share);
        }
    }

    // Growth
    if let Some(prev_income) = statements.income_statement.previous() {
        income_growth(&mut ratios, revenue, net_income, eps, shares, &prev_income);
    } else {
        tracing::debug!(symbol = %statements.symbol, "no prior income row, skipping income growth");
    }
    if let Some(prev_balance) = statements.balance_sheet.previous() {
        growth(
            &mut ratios,
            Ratio::AssetsGrowth,
            total_assets,
            prev_balance.get(LineItem::TotalAssets),
        );
        growth(
            &mut ratios,
            Ratio::EquityGrowth,
            total_equity,
            prev_balance.get(LineItem::TotalEquity),
        );
    } else {
        tracing::debug!(symbol = %statements.symbol, "no prior balance row, skipping balance growth");
    }

    tracing::debug!(
        symbol = %statements.symbol,
        computed = ratios.len(),
        "ratios computed"
    );

    Ok(ratios)
}

fn income_growth(
    ratios: &mut RatioMap,
    revenue: f64,
    net_income: f64,
    eps: Option<f64>,
    shares: f64,
    prev: &StatementRow<'_>,
) {
    let prev_net_income = prev.get(LineItem::NetIncome);
    growth(
        ratios,
        Ratio::RevenueGrowth,
        revenue,
        prev.get(LineItem::TotalRevenue),
    );
    growth(ratios, Ratio::NetIncomeGrowth, net_income, prev_net_income);

    // Prior EPS is measured against today's share count.
    if let Some(eps) = eps {
        growth(ratios, Ratio::EpsGrowth, eps, prev_net_income / shares);
    }
}

fn growth(ratios: &mut RatioMap, ratio: Ratio, current: f64, previous: f64) {
    if previous != 0.0 {
        ratios.insert(ratio, (current - previous) / previous);
    }
}
