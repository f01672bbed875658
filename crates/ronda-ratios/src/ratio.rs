//! The ratio catalogue: names, categories and display formats.

use ronda_traits::format;
use serde::{Deserialize, Serialize};

/// Ratio category classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioCategory {
    /// Margins and returns
    Profitability,
    /// Short-term solvency
    Liquidity,
    /// Capital structure
    Leverage,
    /// Price relative to fundamentals
    Valuation,
    /// Year-over-year change
    Growth,
}

impl RatioCategory {
    /// Get a human-readable description of the category.
    #[must_use]
    pub const fn description(&self) -> &str {
        match self {
            Self::Profitability => "Margins and returns on capital",
            Self::Liquidity => "Ability to cover current liabilities",
            Self::Leverage => "Debt relative to equity",
            Self::Valuation => "Market price relative to earnings and book value",
            Self::Growth => "Year-over-year change against the prior period",
        }
    }
}

/// How a ratio is rendered for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatioFormat {
    /// `0.1234` renders as `12.34%`.
    Percent,
    /// `1.5` renders as `1.50`.
    Decimal,
}

impl RatioFormat {
    /// Render a raw ratio value.
    #[must_use]
    pub fn render(&self, value: f64) -> String {
        match self {
            Self::Percent => format::percent(value, 2),
            Self::Decimal => format::decimal(value, 2),
        }
    }
}

/// A financial ratio.
///
/// Variants are declared in display order, which is also their `Ord` order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Ratio {
    /// Gross profit / revenue.
    GrossMargin,
    /// Operating income / revenue.
    OperatingMargin,
    /// Net income / revenue.
    NetMargin,
    /// Current assets / current liabilities.
    CurrentRatio,
    /// (Current assets - inventory) / current liabilities.
    QuickRatio,
    /// Net income / total equity.
    ReturnOnEquity,
    /// Net income / total assets.
    ReturnOnAssets,
    /// (Short-term + long-term debt) / total equity.
    DebtToEquity,
    /// Price / earnings per share.
    PriceToEarnings,
    /// Price / book value per share.
    PriceToBook,
    /// Revenue change against the prior income row.
    RevenueGrowth,
    /// Net income change against the prior income row.
    NetIncomeGrowth,
    /// Total assets change against the prior balance row.
    AssetsGrowth,
    /// Total equity change against the prior balance row.
    EquityGrowth,
    /// EPS change against the prior income row, at current share count.
    EpsGrowth,
}

impl Ratio {
    /// Every ratio, in display order.
    pub const ALL: [Self; 15] = [
        Self::GrossMargin,
        Self::OperatingMargin,
        Self::NetMargin,
        Self::CurrentRatio,
        Self::QuickRatio,
        Self::ReturnOnEquity,
        Self::ReturnOnAssets,
        Self::DebtToEquity,
        Self::PriceToEarnings,
        Self::PriceToBook,
        Self::RevenueGrowth,
        Self::NetIncomeGrowth,
        Self::AssetsGrowth,
        Self::EquityGrowth,
        Self::EpsGrowth,
    ];

    /// Display name, used as the key in serialized output.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::GrossMargin => "Gross Margin",
            Self::OperatingMargin => "Operating Margin",
            Self::NetMargin => "Net Margin",
            Self::CurrentRatio => "Current Ratio",
            Self::QuickRatio => "Quick Ratio",
            Self::ReturnOnEquity => "Return on Equity (ROE)",
            Self::ReturnOnAssets => "Return on Assets (ROA)",
            Self::DebtToEquity => "Debt to Equity",
            Self::PriceToEarnings => "P/E Ratio",
            Self::PriceToBook => "P/B Ratio",
            Self::RevenueGrowth => "YoY Revenue Growth",
            Self::NetIncomeGrowth => "YoY Net Income Growth",
            Self::AssetsGrowth => "YoY Assets Growth",
            Self::EquityGrowth => "YoY Equity Growth",
            Self::EpsGrowth => "YoY EPS Growth",
        }
    }

    /// Category classification.
    #[must_use]
    pub const fn category(&self) -> RatioCategory {
        match self {
            Self::GrossMargin
            | Self::OperatingMargin
            | Self::NetMargin
            | Self::ReturnOnEquity
            | Self::ReturnOnAssets => RatioCategory::Profitability,
            Self::CurrentRatio | Self::QuickRatio => RatioCategory::Liquidity,
            Self::DebtToEquity => RatioCategory::Leverage,
            Self::PriceToEarnings | Self::PriceToBook => RatioCategory::Valuation,
            Self::RevenueGrowth
            | Self::NetIncomeGrowth
            | Self::AssetsGrowth
            | Self::EquityGrowth
            | Self::EpsGrowth => RatioCategory::Growth,
        }
    }

    /// Display format.
    #[must_use]
    pub const fn format(&self) -> RatioFormat {
        match self {
            Self::CurrentRatio
            | Self::QuickRatio
            | Self::DebtToEquity
            | Self::PriceToEarnings
            | Self::PriceToBook => RatioFormat::Decimal,
            _ => RatioFormat::Percent,
        }
    }

    /// Look up a ratio by its display name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.name() == name)
    }
}

/// All ratios in a specific category.
#[must_use]
pub fn ratios_by_category(category: RatioCategory) -> Vec<Ratio> {
    Ratio::ALL
        .into_iter()
        .filter(|r| r.category() == category)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ratio_count() {
        assert_eq!(Ratio::ALL.len(), 15);
    }

    #[test]
    fn test_names_are_unique_and_round_trip() {
        for ratio in Ratio::ALL {
            assert_eq!(Ratio::from_name(ratio.name()), Some(ratio));
        }
        assert!(Ratio::from_name("EV/EBITDA").is_none());
    }

    #[test]
    fn test_display_order_matches_ord() {
        let mut sorted = Ratio::ALL;
        sorted.sort();
        assert_eq!(sorted, Ratio::ALL);
    }

    #[test]
    fn test_formats() {
        assert_eq!(Ratio::GrossMargin.format(), RatioFormat::Percent);
        assert_eq!(Ratio::ReturnOnEquity.format(), RatioFormat::Percent);
        assert_eq!(Ratio::EpsGrowth.format(), RatioFormat::Percent);
        assert_eq!(Ratio::CurrentRatio.format(), RatioFormat::Decimal);
        assert_eq!(Ratio::PriceToEarnings.format(), RatioFormat::Decimal);
    }

    #[test]
    fn test_render() {
        assert_eq!(RatioFormat::Percent.render(0.1234), "12.34%");
        assert_eq!(RatioFormat::Decimal.render(1.5), "1.50");
        assert_eq!(RatioFormat::Percent.render(-0.05), "-5.00%");
    }

    #[test]
    fn test_ratios_by_category() {
        assert_eq!(
            ratios_by_category(RatioCategory::Liquidity),
            vec![Ratio::CurrentRatio, Ratio::QuickRatio]
        );
        assert_eq!(ratios_by_category(RatioCategory::Growth).len(), 5);
        let total: usize = [
            RatioCategory::Profitability,
            RatioCategory::Liquidity,
            RatioCategory::Leverage,
            RatioCategory::Valuation,
            RatioCategory::Growth,
        ]
        .into_iter()
        .map(|c| ratios_by_category(c).len())
        .sum();
        assert_eq!(total, 15);
    }
}
