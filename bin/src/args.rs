//! Argument groups shared by the subcommands.

use crate::output::OutputFormat;
use anyhow::{Context, Result};
use clap::Args;
use ronda::{AssumptionSet, DcfConfig, DcfEngine, Methodology};
use std::{fs, path::PathBuf};

/// Which companies to analyse and how to print them.
#[derive(Debug, Args)]
pub(crate) struct Target {
    /// Ticker symbols (comma or space separated)
    #[arg(required = true, value_delimiter = ',')]
    pub(crate) symbols: Vec<String>,

    #[command(flatten)]
    pub(crate) source: SourceArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub(crate) format: OutputFormat,
}

/// Where statements come from.
#[derive(Debug, Args)]
pub(crate) struct SourceArgs {
    /// Snapshot JSON file, or a directory of `<SYMBOL>.json` files
    /// (default: fetch from FMP using FMP_API_KEY)
    #[arg(short, long)]
    pub(crate) input: Option<PathBuf>,

    /// Annual periods to fetch from FMP
    #[arg(long, default_value_t = ronda::fmp::DEFAULT_PERIODS)]
    pub(crate) periods: u32,
}

/// Valuation assumptions and methodology.
///
/// Explicit flags override values read from `--assumptions`, which in turn
/// override the defaults.
#[derive(Debug, Args)]
pub(crate) struct AssumptionArgs {
    /// JSON file with an assumption set
    #[arg(long, value_name = "FILE")]
    pub(crate) assumptions: Option<PathBuf>,

    /// Discount rate (WACC) as a fraction, e.g. 0.10
    #[arg(long)]
    pub(crate) discount_rate: Option<f64>,

    /// Terminal growth rate as a fraction
    #[arg(long)]
    pub(crate) terminal_growth: Option<f64>,

    /// Projection horizon in years
    #[arg(long)]
    pub(crate) years: Option<u32>,

    /// Annual revenue growth as a fraction
    #[arg(long)]
    pub(crate) revenue_growth: Option<f64>,

    /// Operating margin added per year as a fraction
    #[arg(long)]
    pub(crate) margin_improvement: Option<f64>,

    /// Formula variant (conservative or updated)
    #[arg(long, default_value = "conservative")]
    pub(crate) methodology: Methodology,
}

impl AssumptionArgs {
    /// The assumption set after merging defaults, file and flags.
    pub(crate) fn resolve(&self) -> Result<AssumptionSet> {
        let base = match &self.assumptions {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading assumptions from {}", path.display()))?;
                serde_json::from_str(&text)
                    .with_context(|| format!("parsing assumptions in {}", path.display()))?
            }
            None => AssumptionSet::default(),
        };
        Ok(self.apply_flags(base))
    }

    fn apply_flags(&self, mut set: AssumptionSet) -> AssumptionSet {
        if let Some(v) = self.discount_rate {
            set.discount_rate = v;
        }
        if let Some(v) = self.terminal_growth {
            set.terminal_growth = v;
        }
        if let Some(v) = self.years {
            set.projection_years = v;
        }
        if let Some(v) = self.revenue_growth {
            set.revenue_growth = v;
        }
        if let Some(v) = self.margin_improvement {
            set.margin_improvement = v;
        }
        set
    }

    /// Engine for the selected methodology.
    pub(crate) const fn engine(&self) -> DcfEngine {
        DcfEngine::new(DcfConfig::for_methodology(self.methodology))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn no_flags() -> AssumptionArgs {
        AssumptionArgs {
            assumptions: None,
            discount_rate: None,
            terminal_growth: None,
            years: None,
            revenue_growth: None,
            margin_improvement: None,
            methodology: Methodology::Conservative,
        }
    }

    #[test]
    fn test_defaults_without_flags() {
        assert_eq!(no_flags().resolve().unwrap(), AssumptionSet::default());
    }

    #[test]
    fn test_flags_override() {
        let args = AssumptionArgs {
            discount_rate: Some(0.08),
            years: Some(10),
            ..no_flags()
        };
        let set = args.resolve().unwrap();
        assert_relative_eq!(set.discount_rate, 0.08);
        assert_eq!(set.projection_years, 10);
        assert_relative_eq!(set.terminal_growth, 0.025);
    }

    #[test]
    fn test_file_then_flags() {
        let dir = std::env::temp_dir().join(format!("ronda-cli-args-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("assumptions.json");
        fs::write(&path, r#"{"discount_rate": 0.12, "revenue_growth": 0.08}"#).unwrap();

        let args = AssumptionArgs {
            assumptions: Some(path),
            revenue_growth: Some(0.03),
            ..no_flags()
        };
        let set = args.resolve().unwrap();
        assert_relative_eq!(set.discount_rate, 0.12);
        assert_relative_eq!(set.revenue_growth, 0.03);
        // Fields missing from the file keep their defaults.
        assert_eq!(set.projection_years, 5);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let args = AssumptionArgs {
            assumptions: Some(PathBuf::from("/nonexistent/assumptions.json")),
            ..no_flags()
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn test_engine_follows_methodology() {
        let args = AssumptionArgs {
            methodology: Methodology::Updated,
            ..no_flags()
        };
        assert_eq!(args.engine().config(), &DcfConfig::updated());
    }
}
