//! Pricing catalog - packages, line items, add-ons and dynamic pricing rules of a service.
//!
//! Pure data plus validation. Prices that are missing or negative resolve to 0 through
//! the `resolved_*` accessors; computation lives in [`crate::core::pricing`] and
//! [`crate::core::rules`].

use std::{collections::HashSet, fmt};

use serde::{Deserialize, Serialize};

use crate::errors::{Error, Result};

/// Kind of billable component in a package.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Staff (photographers, servers, coordinators)
    Personnel,
    /// Gear (lighting, sound system, drone)
    Equipment,
    /// Output (album, edited video, printed menu)
    Deliverable,
    /// Anything else
    Other,
}

impl ItemType {
    /// Storage label.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Personnel => "personnel",
            Self::Equipment => "equipment",
            Self::Deliverable => "deliverable",
            Self::Other => "other",
        }
    }

    /// Parses a storage label; unknown labels map to [`ItemType::Other`].
    #[must_use]
    pub fn from_label(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "personnel" | "staff" => Self::Personnel,
            "equipment" => Self::Equipment,
            "deliverable" | "deliverables" => Self::Deliverable,
            _ => Self::Other,
        }
    }
}

/// A single billable component of a package.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageItem {
    /// Identifier
    pub id: String,
    #[serde(alias = "item_name")]
    /// Display name
    pub name: String,
    #[serde(alias = "item_type")]
    /// Kind of component
    pub item_type: ItemType,
    /// Number of units included
    pub quantity: f64,
    #[serde(default, alias = "unit_type")]
    /// Unit label (hours, pax, pieces)
    pub unit_type: Option<String>,
    #[serde(default, alias = "unit_value")]
    /// Value of one unit
    pub unit_value: Option<f64>,
}

impl PackageItem {
    /// `quantity * unit_value`, with a missing or negative value counted as 0.
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.quantity.max(0.0) * non_negative(self.unit_value)
    }
}

/// A named pricing tier of a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServicePackage {
    /// Identifier
    pub id: String,
    #[serde(alias = "package_name")]
    /// Display name ("Basic", "Premium")
    pub name: String,
    #[serde(default, alias = "base_price")]
    /// Listed price
    pub base_price: Option<f64>,
    #[serde(default, alias = "is_default")]
    /// Whether this is the package shown by default
    pub is_default: bool,
    #[serde(default)]
    /// Ordered line items
    pub items: Vec<PackageItem>,
}

impl ServicePackage {
    /// Listed price, with missing, negative and non-finite prices resolved to 0.
    #[must_use]
    pub fn resolved_base_price(&self) -> f64 {
        non_negative(self.base_price)
    }

    /// Sum of the line totals of all items.
    #[must_use]
    pub fn itemized_total(&self) -> f64 {
        self.items.iter().map(PackageItem::line_total).sum()
    }
}

/// Optional extra attached to a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceAddon {
    /// Identifier
    pub id: String,
    #[serde(alias = "addon_name")]
    /// Display name ("Extra Hour")
    pub name: String,
    #[serde(default, alias = "addon_price")]
    /// Price of the add-on
    pub price: Option<f64>,
}

impl ServiceAddon {
    /// Price with missing or negative values resolved to 0.
    #[must_use]
    pub fn resolved_price(&self) -> f64 {
        non_negative(self.price)
    }
}

/// Dynamic pricing policy type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleType {
    /// Priced per hour beyond the base block
    Hourly,
    /// Priced per guest beyond the base headcount
    PerPax,
    /// Priced per day beyond the base days
    Daily,
    /// Base tier plus a per-unit step price
    Tiered,
    /// Volume discount
    BulkDiscount,
    /// Date-dependent pricing
    Seasonal,
}

impl RuleType {
    /// Storage label.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Hourly => "hourly",
            Self::PerPax => "per_pax",
            Self::Daily => "daily",
            Self::Tiered => "tiered",
            Self::BulkDiscount => "bulk_discount",
            Self::Seasonal => "seasonal",
        }
    }

    /// Parses a storage label.
    ///
    /// # Errors
    /// Returns [`Error::InvalidPricingRule`] for unrecognized labels.
    pub fn parse(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "per_pax" | "per_head" => Ok(Self::PerPax),
            "daily" => Ok(Self::Daily),
            "tiered" => Ok(Self::Tiered),
            "bulk_discount" => Ok(Self::BulkDiscount),
            "seasonal" => Ok(Self::Seasonal),
            _ => Err(Error::InvalidPricingRule {
                rule_type: s.to_string(),
                reason: "unrecognized rule type".to_string(),
                value: None,
            }),
        }
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// Quantity-based pricing formula attached to a service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingRule {
    /// Identifier
    pub id: String,
    #[serde(alias = "rule_type")]
    /// Formula type
    pub rule_type: RuleType,
    #[serde(alias = "base_unit")]
    /// Units covered by `base_price`
    pub base_unit: f64,
    #[serde(alias = "base_price")]
    /// Price of the first `base_unit` units
    pub base_price: f64,
    #[serde(default, alias = "additional_unit_price")]
    /// Price of each unit beyond `base_unit`
    pub additional_unit_price: f64,
    #[serde(default, alias = "minimum_units")]
    /// Smallest bookable quantity
    pub minimum_units: Option<f64>,
    #[serde(default, alias = "maximum_units")]
    /// Largest bookable quantity
    pub maximum_units: Option<f64>,
    #[serde(default = "active_by_default", alias = "is_active")]
    /// Inactive rules are kept for history but never evaluated
    pub is_active: bool,
}

const fn active_by_default() -> bool {
    true
}

/// A vendor's service with its pricing catalog.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Service {
    /// Identifier
    pub id: String,
    #[serde(default, alias = "vendor_id")]
    /// Owning vendor
    pub vendor_id: Option<String>,
    #[serde(default, alias = "service_name")]
    /// Display name
    pub name: String,
    #[serde(default, alias = "service_type", alias = "category")]
    /// Category ("Photography", "Catering")
    pub service_type: Option<String>,
    #[serde(default, alias = "base_price")]
    /// Flat price when no packages exist
    pub base_price: Option<f64>,
    #[serde(default, alias = "minimum_price", alias = "min_price")]
    /// Lower bound of a flat price range
    pub minimum_price: Option<f64>,
    #[serde(default, alias = "maximum_price", alias = "max_price")]
    /// Upper bound of a flat price range
    pub maximum_price: Option<f64>,
    #[serde(default)]
    /// Pricing tiers
    pub packages: Vec<ServicePackage>,
    #[serde(default)]
    /// Independently priced extras
    pub addons: Vec<ServiceAddon>,
    #[serde(default, alias = "pricing_rules")]
    /// Dynamic pricing rules
    pub pricing_rules: Vec<PricingRule>,
}

impl Service {
    /// The package marked default, if any.
    #[must_use]
    pub fn default_package(&self) -> Option<&ServicePackage> {
        self.packages.iter().find(|p| p.is_default)
    }

    /// Checks the catalog invariants.
    ///
    /// # Errors
    /// Returns [`Error::InvalidCatalog`] when:
    /// - packages exist but not exactly one is marked default
    /// - any price is negative or not finite
    /// - a package item has a non-positive quantity
    /// - a rule has `minimum_units > maximum_units` or a negative base unit
    /// - two active rules share a type
    pub fn validate(&self) -> Result<()> {
        let invalid = |message: String| Err(Error::InvalidCatalog { message });

        if !self.packages.is_empty() {
            let defaults = self.packages.iter().filter(|p| p.is_default).count();
            if defaults != 1 {
                return invalid(format!(
                    "service '{}' has {defaults} default packages, expected exactly one",
                    self.id
                ));
            }
        }

        for (label, price) in [
            ("base_price", self.base_price),
            ("minimum_price", self.minimum_price),
            ("maximum_price", self.maximum_price),
        ] {
            if !is_valid_price(price) {
                return invalid(format!("service '{}' has an invalid {label}", self.id));
            }
        }

        for package in &self.packages {
            if !is_valid_price(package.base_price) {
                return invalid(format!("package '{}' has an invalid base price", package.id));
            }
            for item in &package.items {
                if !(item.quantity.is_finite() && item.quantity > 0.0) {
                    return invalid(format!("item '{}' must have a positive quantity", item.id));
                }
                if !is_valid_price(item.unit_value) {
                    return invalid(format!("item '{}' has an invalid unit value", item.id));
                }
            }
        }

        for addon in &self.addons {
            if !is_valid_price(addon.price) {
                return invalid(format!("add-on '{}' has an invalid price", addon.id));
            }
        }

        let mut active_types = HashSet::new();
        for rule in &self.pricing_rules {
            if !(rule.base_unit.is_finite() && rule.base_unit >= 0.0)
                || !is_valid_price(Some(rule.base_price))
                || !is_valid_price(Some(rule.additional_unit_price))
            {
                return invalid(format!("rule '{}' has invalid unit pricing", rule.id));
            }
            if let (Some(min), Some(max)) = (rule.minimum_units, rule.maximum_units)
                && min > max
            {
                return invalid(format!(
                    "rule '{}' has minimum_units {min} above maximum_units {max}",
                    rule.id
                ));
            }
            if rule.is_active && !active_types.insert(rule.rule_type) {
                return invalid(format!(
                    "service '{}' has more than one active {} rule",
                    self.id, rule.rule_type
                ));
            }
        }

        Ok(())
    }
}

fn is_valid_price(price: Option<f64>) -> bool {
    price.is_none_or(|p| p.is_finite() && p >= 0.0)
}

fn non_negative(value: Option<f64>) -> f64 {
    value.filter(|v| v.is_finite() && *v >= 0.0).unwrap_or(0.0)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_sample_service_is_valid() {
        assert!(sample_service().validate().is_ok());
    }

    #[test]
    fn test_resolved_base_price_falls_back_to_zero() {
        assert_eq!(sample_package("p", "P", None, true).resolved_base_price(), 0.0);
        assert_eq!(
            sample_package("p", "P", Some(-10.0), true).resolved_base_price(),
            0.0
        );
        assert_eq!(
            sample_package("p", "P", Some(f64::NAN), true).resolved_base_price(),
            0.0
        );
    }

    #[test]
    fn test_itemized_total() {
        let service = sample_service();
        // 2 photographers * 15000 + 1 album * 10000
        assert_eq!(service.packages[0].itemized_total(), 40000.0);
    }

    #[test]
    fn test_validate_requires_exactly_one_default() {
        let mut service = sample_service();
        service.packages[0].is_default = false;
        assert!(matches!(
            service.validate(),
            Err(Error::InvalidCatalog { .. })
        ));

        service.packages[0].is_default = true;
        service.packages[1].is_default = true;
        assert!(matches!(
            service.validate(),
            Err(Error::InvalidCatalog { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_negative_prices_and_quantities() {
        let mut service = sample_service();
        service.packages[0].base_price = Some(-1.0);
        assert!(service.validate().is_err());

        let mut service = sample_service();
        service.packages[0].items[0].quantity = 0.0;
        assert!(service.validate().is_err());

        let mut service = sample_service();
        service.addons[0].price = Some(f64::INFINITY);
        assert!(service.validate().is_err());
    }

    #[test]
    fn test_validate_rule_bounds_and_uniqueness() {
        let mut service = sample_service();
        service.pricing_rules[0].minimum_units = Some(20.0);
        assert!(service.validate().is_err());

        let mut service = sample_service();
        let mut duplicate = service.pricing_rules[0].clone();
        duplicate.id = "r2".to_string();
        service.pricing_rules.push(duplicate.clone());
        assert!(service.validate().is_err());

        // An inactive duplicate is allowed
        let last = service.pricing_rules.len() - 1;
        service.pricing_rules[last].is_active = false;
        assert!(service.validate().is_ok());
    }

    #[test]
    fn test_service_without_packages_needs_no_default() {
        let service = Service {
            id: "s-flat".to_string(),
            base_price: Some(25000.0),
            ..Service::default()
        };
        assert!(service.validate().is_ok());
        assert!(service.default_package().is_none());
    }

    #[test]
    fn test_rule_type_parse() {
        assert_eq!(RuleType::parse("per_pax").unwrap(), RuleType::PerPax);
        assert_eq!(RuleType::parse(" Hourly ").unwrap(), RuleType::Hourly);
        assert!(matches!(
            RuleType::parse("lunar"),
            Err(Error::InvalidPricingRule { .. })
        ));
    }

    #[test]
    fn test_item_type_labels() {
        assert_eq!(ItemType::from_label("Personnel"), ItemType::Personnel);
        assert_eq!(ItemType::from_label("deliverables"), ItemType::Deliverable);
        assert_eq!(ItemType::from_label("misc"), ItemType::Other);
    }

    #[test]
    fn test_snake_case_catalog_deserializes() {
        let json = r#"{
            "id": "s1",
            "service_name": "Catering",
            "packages": [
                {"id": "p1", "package_name": "Basic", "base_price": 60000, "is_default": true}
            ],
            "pricing_rules": [
                {"id": "r1", "rule_type": "per_pax", "base_unit": 100, "base_price": 60000,
                 "additional_unit_price": 550}
            ]
        }"#;
        let service: Service = serde_json::from_str(json).unwrap();
        assert_eq!(service.name, "Catering");
        assert_eq!(service.packages[0].resolved_base_price(), 60000.0);
        assert!(service.pricing_rules[0].is_active);
    }
}
