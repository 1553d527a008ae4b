//! Application configuration loading from config.toml
//!
//! Pricing tiers, the out-of-range quantity policy and the dashboard heuristics are
//! data rather than code. Every section is optional; missing values fall back to the
//! defaults of the corresponding core types.

use crate::{
    core::{dashboard::DashboardSettings, pricing::PricingPolicy, rules::QuantityPolicy},
    errors::{Error, Result},
};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Package tier discounts
    pub pricing: PricingPolicy,
    /// Pricing rule evaluation settings
    pub rules: RuleSettings,
    /// Dashboard heuristics
    pub dashboard: DashboardSettings,
}

/// `[rules]` section
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RuleSettings {
    /// Clamp or reject quantities outside a rule's bounds
    pub quantity_policy: QuantityPolicy,
}

impl AppConfig {
    /// Checks that the loaded values make sense.
    ///
    /// # Errors
    /// Returns [`Error::Config`] when a discount is outside `[0, 1)`, a multiplier is
    /// below 1, the budget floor is negative or the activity limit is 0.
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::Config { message });

        for tier in &self.pricing.tiers {
            if !(0.0..1.0).contains(&tier.discount) {
                return invalid(format!(
                    "discount for tier '{}' must be in [0, 1), got {}",
                    tier.name, tier.discount
                ));
            }
        }

        let dashboard = &self.dashboard;
        if dashboard.activity_limit == 0 {
            return invalid("dashboard.activity_limit must be positive".to_string());
        }
        if !(dashboard.budget_floor.is_finite() && dashboard.budget_floor >= 0.0) {
            return invalid("dashboard.budget_floor must be a non-negative number".to_string());
        }
        for (name, value) in [
            ("budget_multiplier", dashboard.budget_multiplier),
            ("category_headroom", dashboard.category_headroom),
        ] {
            if !(value.is_finite() && value >= 1.0) {
                return invalid(format!("dashboard.{name} must be at least 1, got {value}"));
            }
        }

        Ok(())
    }
}

/// Parses and validates configuration from a TOML string.
///
/// # Errors
/// Returns an error if the TOML syntax is invalid or a value fails validation.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
/// - A value fails validation
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path = path.as_ref();
    debug!("Attempting to load configuration from: {:?}", path);
    let contents = std::fs::read_to_string(path).map_err(|e| Error::Config {
        message: format!("Failed to read config file {}: {e}", path.display()),
    })?;
    parse_config(&contents)
}

/// Loads configuration from ./config.toml, falling back to defaults when the file
/// does not exist.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    if !path.exists() {
        debug!("No config.toml found, using defaults");
        return Ok(AppConfig::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            [[pricing.tiers]]
            name = "Silver"
            discount = 0.05

            [[pricing.tiers]]
            name = "Gold"
            discount = 0.12

            [rules]
            quantity_policy = "reject"

            [dashboard]
            activity_limit = 5
            budget_floor = 80000.0
        "#;

        let config = parse_config(toml_str).unwrap();
        assert_eq!(config.pricing.tiers.len(), 2);
        assert_eq!(config.pricing.tiers[1].name, "Gold");
        assert_eq!(config.rules.quantity_policy, QuantityPolicy::Reject);
        assert_eq!(config.dashboard.activity_limit, 5);
        assert_eq!(config.dashboard.budget_floor, 80000.0);
        // Unset keys keep their defaults
        assert_eq!(config.dashboard.budget_multiplier, 1.5);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.pricing.tiers.len(), 3);
        assert_eq!(config.rules.quantity_policy, QuantityPolicy::Clamp);
        assert_eq!(config.dashboard.activity_limit, 10);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let bad_discount = r#"
            [[pricing.tiers]]
            name = "Free"
            discount = 1.0
        "#;
        assert!(matches!(
            parse_config(bad_discount),
            Err(Error::Config { .. })
        ));

        let bad_limit = "[dashboard]\nactivity_limit = 0\n";
        assert!(parse_config(bad_limit).is_err());

        let bad_multiplier = "[dashboard]\nbudget_multiplier = 0.5\n";
        assert!(parse_config(bad_multiplier).is_err());
    }

    #[test]
    fn test_malformed_toml() {
        assert!(matches!(
            parse_config("[rules\nquantity_policy ="),
            Err(Error::Config { .. })
        ));
        assert!(parse_config("[rules]\nquantity_policy = \"sometimes\"\n").is_err());
    }

    #[test]
    fn test_missing_file() {
        assert!(matches!(
            load_config("does/not/exist.toml"),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn test_shipped_config_matches_defaults() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml");
        let config = load_config(path).unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
