//! Pricing rule evaluation.
//!
//! Unit-based rules price the first `base_unit` units at `base_price` and every further
//! unit at `additional_unit_price`. Requested quantities outside the rule's bounds are
//! clamped or rejected according to [`QuantityPolicy`].

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    core::catalog::{PricingRule, RuleType, Service},
    errors::{Error, Result},
};

/// What to do with a quantity outside `[minimum_units, maximum_units]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantityPolicy {
    /// Bill the nearest bound
    #[default]
    Clamp,
    /// Refuse with [`Error::InvalidPricingRule`]
    Reject,
}

/// Result of evaluating a rule.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RuleEvaluation {
    /// Quantity the caller asked for
    pub requested_quantity: f64,
    /// Quantity actually priced after clamping
    pub billed_quantity: f64,
    /// Computed price
    pub price: f64,
}

impl RuleEvaluation {
    /// Whether the requested quantity was moved to a bound.
    #[must_use]
    pub fn was_clamped(&self) -> bool {
        (self.requested_quantity - self.billed_quantity).abs() > f64::EPSILON
    }
}

fn rule_error(rule: &PricingRule, reason: impl Into<String>, value: Option<f64>) -> Error {
    Error::InvalidPricingRule {
        rule_type: rule.rule_type.to_string(),
        reason: reason.into(),
        value,
    }
}

/// Evaluates a rule and returns the price only.
///
/// # Errors
/// See [`evaluate_detailed`].
pub fn evaluate(rule: &PricingRule, quantity: f64, policy: QuantityPolicy) -> Result<f64> {
    evaluate_detailed(rule, quantity, policy).map(|e| e.price)
}

/// Evaluates a rule for `quantity`.
///
/// # Errors
/// Returns [`Error::InvalidPricingRule`] when the rule is inactive, its type has no
/// quantity formula, the quantity is negative or not finite, or the quantity is out of
/// bounds under [`QuantityPolicy::Reject`].
pub fn evaluate_detailed(
    rule: &PricingRule,
    quantity: f64,
    policy: QuantityPolicy,
) -> Result<RuleEvaluation> {
    if !rule.is_active {
        return Err(rule_error(rule, "rule is inactive", None));
    }

    match rule.rule_type {
        RuleType::Hourly | RuleType::PerPax | RuleType::Daily | RuleType::Tiered => {}
        RuleType::BulkDiscount | RuleType::Seasonal => {
            return Err(rule_error(rule, "rule type has no quantity formula", None));
        }
    }

    if !quantity.is_finite() || quantity < 0.0 {
        return Err(rule_error(rule, "quantity must be a non-negative number", Some(quantity)));
    }

    let lower = rule.minimum_units.unwrap_or(0.0);
    let upper = rule.maximum_units.unwrap_or(f64::INFINITY);
    if lower > upper {
        return Err(rule_error(rule, "minimum units exceed maximum units", None));
    }

    let billed_quantity = if quantity < lower || quantity > upper {
        match policy {
            QuantityPolicy::Reject => {
                return Err(rule_error(
                    rule,
                    format!("quantity outside [{lower}, {upper}]"),
                    Some(quantity),
                ));
            }
            QuantityPolicy::Clamp => {
                let clamped = quantity.clamp(lower, upper);
                debug!(rule_id = %rule.id, quantity, clamped, "Clamped rule quantity");
                clamped
            }
        }
    } else {
        quantity
    };

    let extra_units = (billed_quantity - rule.base_unit).max(0.0);
    Ok(RuleEvaluation {
        requested_quantity: quantity,
        billed_quantity,
        price: rule.base_price + rule.additional_unit_price * extra_units,
    })
}

/// The first active rule of `rule_type`, in catalog order.
#[must_use]
pub fn active_rule(service: &Service, rule_type: RuleType) -> Option<&PricingRule> {
    service
        .pricing_rules
        .iter()
        .find(|r| r.is_active && r.rule_type == rule_type)
}

/// Prices `quantity` with the service's active rule of `rule_type`.
///
/// # Errors
/// Returns [`Error::InvalidPricingRule`] if the service has no active rule of that type,
/// or if evaluation fails.
pub fn quote_with_rule(
    service: &Service,
    rule_type: RuleType,
    quantity: f64,
    policy: QuantityPolicy,
) -> Result<RuleEvaluation> {
    let rule = active_rule(service, rule_type).ok_or_else(|| Error::InvalidPricingRule {
        rule_type: rule_type.to_string(),
        reason: format!("service '{}' has no active rule of this type", service.id),
        value: None,
    })?;
    evaluate_detailed(rule, quantity, policy)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;

    #[test]
    fn test_hourly_rule_extra_units() {
        let rule = sample_rule("r1", RuleType::Hourly);
        assert_eq!(evaluate(&rule, 10.0, QuantityPolicy::Clamp).unwrap(), 60000.0);
    }

    #[test]
    fn test_within_base_block_is_base_price() {
        let rule = sample_rule("r1", RuleType::Hourly);
        assert_eq!(evaluate(&rule, 8.0, QuantityPolicy::Clamp).unwrap(), 50000.0);
        assert_eq!(evaluate(&rule, 5.0, QuantityPolicy::Clamp).unwrap(), 50000.0);
    }

    #[test]
    fn test_clamp_policy() {
        let rule = sample_rule("r1", RuleType::PerPax);
        let high = evaluate_detailed(&rule, 20.0, QuantityPolicy::Clamp).unwrap();
        assert_eq!(high.billed_quantity, 16.0);
        assert_eq!(high.price, 90000.0);
        assert!(high.was_clamped());

        let low = evaluate_detailed(&rule, 2.0, QuantityPolicy::Clamp).unwrap();
        assert_eq!(low.billed_quantity, 4.0);
        assert_eq!(low.price, 50000.0);

        let inside = evaluate_detailed(&rule, 9.0, QuantityPolicy::Clamp).unwrap();
        assert!(!inside.was_clamped());
    }

    #[test]
    fn test_reject_policy_reports_value() {
        let rule = sample_rule("r1", RuleType::Daily);
        let result = evaluate(&rule, 20.0, QuantityPolicy::Reject);
        assert!(matches!(
            result,
            Err(Error::InvalidPricingRule { value: Some(v), .. }) if v == 20.0
        ));
        assert_eq!(evaluate(&rule, 16.0, QuantityPolicy::Reject).unwrap(), 90000.0);
    }

    #[test]
    fn test_unbounded_rule() {
        let mut rule = sample_rule("r1", RuleType::Tiered);
        rule.minimum_units = None;
        rule.maximum_units = None;
        assert_eq!(evaluate(&rule, 100.0, QuantityPolicy::Reject).unwrap(), 510000.0);
    }

    #[test]
    fn test_formula_less_types_are_rejected() {
        for rule_type in [RuleType::BulkDiscount, RuleType::Seasonal] {
            let rule = sample_rule("r1", rule_type);
            assert!(matches!(
                evaluate(&rule, 10.0, QuantityPolicy::Clamp),
                Err(Error::InvalidPricingRule { .. })
            ));
        }
    }

    #[test]
    fn test_bad_quantities_are_rejected() {
        let rule = sample_rule("r1", RuleType::Hourly);
        for quantity in [-1.0, f64::NAN, f64::INFINITY] {
            assert!(evaluate(&rule, quantity, QuantityPolicy::Clamp).is_err());
        }
    }

    #[test]
    fn test_inactive_rule_is_rejected() {
        let mut rule = sample_rule("r1", RuleType::Hourly);
        rule.is_active = false;
        assert!(evaluate(&rule, 10.0, QuantityPolicy::Clamp).is_err());
    }

    #[test]
    fn test_first_active_rule_wins() {
        let mut service = sample_service();
        let mut inactive = sample_rule("r0", RuleType::PerPax);
        inactive.is_active = false;
        let mut first = sample_rule("r1", RuleType::PerPax);
        first.base_price = 1000.0;
        let second = sample_rule("r2", RuleType::PerPax);
        service.pricing_rules = vec![inactive, first, second];

        assert_eq!(active_rule(&service, RuleType::PerPax).unwrap().id, "r1");
        assert!(active_rule(&service, RuleType::Seasonal).is_none());
    }

    #[test]
    fn test_quote_with_rule() {
        let service = sample_service();
        let quote = quote_with_rule(&service, RuleType::Hourly, 10.0, QuantityPolicy::Clamp)
            .unwrap();
        assert_eq!(quote.price, 60000.0);
        assert!(matches!(
            quote_with_rule(&service, RuleType::Daily, 1.0, QuantityPolicy::Clamp),
            Err(Error::InvalidPricingRule { .. })
        ));
    }
}
