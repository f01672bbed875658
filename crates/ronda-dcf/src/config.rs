//! Methodology configuration for the DCF engine.
//!
//! Two formula variants exist for the same model. They differ in the margin
//! ceiling, in whether minority interest is subtracted from equity value, and
//! in the special handling of mega-cap companies. Each variant is kept as a
//! named [`Methodology`] so a valuation uses one of them consistently.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Market cap from which a company counts as mega-cap.
pub const MEGA_CAP_THRESHOLD: f64 = 1e12;

/// Share of operating income converted to free cash flow.
pub const BASE_FCF_CONVERSION: f64 = 0.80;

/// Conversion ratio for mega-cap companies.
pub const MEGA_CAP_FCF_CONVERSION: f64 = 0.85;

/// The named formula variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Methodology {
    /// Margin capped at 30%, minority interest subtracted, no mega-cap rules.
    #[default]
    Conservative,
    /// Margin capped at 35%, minority interest ignored, mega-cap rules on.
    Updated,
}

impl Methodology {
    /// Identifier used on the command line and in serialized output.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Conservative => "conservative",
            Self::Updated => "updated",
        }
    }
}

impl FromStr for Methodology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "conservative" => Ok(Self::Conservative),
            "updated" => Ok(Self::Updated),
            other => Err(format!(
                "unknown methodology '{other}', expected 'conservative' or 'updated'"
            )),
        }
    }
}

/// Configuration for the DCF engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DcfConfig {
    /// Variant this configuration was built from.
    pub methodology: Methodology,

    /// Ceiling applied to the projected operating margin.
    pub margin_cap: f64,

    /// Whether minority interest is subtracted when bridging to equity value.
    pub subtract_minority_interest: bool,

    /// Whether mega-cap companies get the higher conversion ratio and the
    /// discount-rate and terminal-growth floors.
    pub mega_cap_adjustments: bool,

    /// Minimum discount rate for mega-cap companies.
    pub mega_cap_discount_floor: f64,

    /// Minimum terminal growth for mega-cap companies.
    pub mega_cap_terminal_floor: f64,
}

impl DcfConfig {
    /// Configuration for a methodology.
    #[must_use]
    pub const fn for_methodology(methodology: Methodology) -> Self {
        match methodology {
            Methodology::Conservative => Self {
                methodology,
                margin_cap: 0.30,
                subtract_minority_interest: true,
                mega_cap_adjustments: false,
                mega_cap_discount_floor: 0.075,
                mega_cap_terminal_floor: 0.03,
            },
            Methodology::Updated => Self {
                methodology,
                margin_cap: 0.35,
                subtract_minority_interest: false,
                mega_cap_adjustments: true,
                mega_cap_discount_floor: 0.075,
                mega_cap_terminal_floor: 0.03,
            },
        }
    }

    /// The conservative methodology.
    #[must_use]
    pub const fn conservative() -> Self {
        Self::for_methodology(Methodology::Conservative)
    }

    /// The updated methodology.
    #[must_use]
    pub const fn updated() -> Self {
        Self::for_methodology(Methodology::Updated)
    }

    /// Operating-income-to-FCF conversion ratio for a company of this size.
    ///
    /// The mega-cap ratio applies from the threshold inclusive.
    #[must_use]
    pub fn conversion_ratio(&self, market_cap: f64) -> f64 {
        if self.mega_cap_adjustments && market_cap >= MEGA_CAP_THRESHOLD {
            MEGA_CAP_FCF_CONVERSION
        } else {
            BASE_FCF_CONVERSION
        }
    }

    /// Whether the discount-rate and terminal-growth floors apply.
    #[must_use]
    pub fn applies_mega_cap_floors(&self, market_cap: f64) -> bool {
        self.mega_cap_adjustments && market_cap > MEGA_CAP_THRESHOLD
    }
}

impl Default for DcfConfig {
    fn default() -> Self {
        Self::conservative()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_config() {
        let config = DcfConfig::default();
        assert_eq!(config.methodology, Methodology::Conservative);
        assert_relative_eq!(config.margin_cap, 0.30);
        assert!(config.subtract_minority_interest);
        assert!(!config.mega_cap_adjustments);
    }

    #[test]
    fn test_updated_config() {
        let config = DcfConfig::updated();
        assert_relative_eq!(config.margin_cap, 0.35);
        assert!(!config.subtract_minority_interest);
        assert!(config.mega_cap_adjustments);
    }

    #[test]
    fn test_conversion_ratio_threshold_is_inclusive() {
        let config = DcfConfig::updated();
        assert_relative_eq!(config.conversion_ratio(MEGA_CAP_THRESHOLD - 1.0), 0.80);
        assert_relative_eq!(config.conversion_ratio(MEGA_CAP_THRESHOLD), 0.85);
        assert_relative_eq!(config.conversion_ratio(3e12), 0.85);
    }

    #[test]
    fn test_conservative_ignores_size() {
        let config = DcfConfig::conservative();
        assert_relative_eq!(config.conversion_ratio(3e12), 0.80);
        assert!(!config.applies_mega_cap_floors(3e12));
    }

    #[test]
    fn test_floors_require_strictly_above_threshold() {
        let config = DcfConfig::updated();
        assert!(!config.applies_mega_cap_floors(MEGA_CAP_THRESHOLD));
        assert!(config.applies_mega_cap_floors(MEGA_CAP_THRESHOLD + 1.0));
    }

    #[test]
    fn test_methodology_from_str() {
        assert_eq!("Updated".parse::<Methodology>(), Ok(Methodology::Updated));
        assert_eq!(
            "conservative".parse::<Methodology>(),
            Ok(Methodology::Conservative)
        );
        assert!("aggressive".parse::<Methodology>().is_err());
    }
}
