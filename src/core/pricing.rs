//! Price calculator - ranges, budget fit and package recommendation.
//!
//! All functions are pure. Tier discounts are data in [`PricingPolicy`] rather than
//! constants, so they can be changed from `config.toml`.

use std::{iter::Sum, ops::Add};

use serde::{Deserialize, Serialize};

use crate::core::catalog::{Service, ServicePackage};

/// Inclusive price bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceRange {
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl PriceRange {
    /// Creates a range from its bounds.
    #[must_use]
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

impl Add for PriceRange {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self::new(self.min + other.min, self.max + other.max)
    }
}

impl Sum for PriceRange {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}

/// A named package tier and its discount fraction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageTier {
    /// Tier name ("Essential", "Deluxe", "Premium")
    pub name: String,
    /// Discount as a fraction in `[0, 1)`
    pub discount: f64,
}

/// Tier discounts applied when bundling several services.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PricingPolicy {
    /// Tiers in display order
    pub tiers: Vec<PackageTier>,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        let tier = |name: &str, discount| PackageTier {
            name: name.to_string(),
            discount,
        };
        Self {
            tiers: vec![
                tier("Essential", 0.10),
                tier("Deluxe", 0.15),
                tier("Premium", 0.20),
            ],
        }
    }
}

impl PricingPolicy {
    /// Finds a tier by name, case-insensitive.
    #[must_use]
    pub fn tier(&self, name: &str) -> Option<&PackageTier> {
        self.tiers.iter().find(|t| t.name.eq_ignore_ascii_case(name))
    }
}

/// A price range after a tier discount.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DiscountedRange {
    /// Discounted lower bound
    pub min: f64,
    /// Discounted upper bound
    pub max: f64,
    /// `(max - min) * discount` on the range before discount
    pub savings: f64,
}

/// One tier offer over a set of services.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TierBundle {
    /// Tier name
    pub tier: String,
    /// Discount fraction applied
    pub discount: f64,
    /// Prices after discount
    pub price: DiscountedRange,
    /// Whether the discounted minimum fits the budget
    pub fits_budget: bool,
}

/// Budget share and recommended package for one service.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageRecommendation {
    /// Service the recommendation is for
    pub service_id: String,
    /// Budget allotted to this service
    pub allocated_budget: f64,
    /// Recommended package, `None` when the service has no packages
    pub package: Option<ServicePackage>,
}

/// Price range of a single service.
///
/// With packages, the bounds are the cheapest and dearest resolved package prices.
/// Without packages the flat `base_price` is used for both bounds, then
/// `minimum_price`/`maximum_price`, each defaulting to 0.
#[must_use]
pub fn service_price_range(service: &Service) -> PriceRange {
    if service.packages.is_empty() {
        if let Some(base) = positive(service.base_price) {
            return PriceRange::new(base, base);
        }
        let min = positive(service.minimum_price).unwrap_or(0.0);
        let max = positive(service.maximum_price).unwrap_or(0.0).max(min);
        return PriceRange::new(min, max);
    }

    let prices = service
        .packages
        .iter()
        .map(ServicePackage::resolved_base_price);
    let (min, max) = prices.fold((f64::INFINITY, 0.0_f64), |(lo, hi), p| {
        (lo.min(p), hi.max(p))
    });
    PriceRange::new(min, max)
}

/// Element-wise sum of [`service_price_range`] over all services.
#[must_use]
pub fn aggregate_price_range(services: &[Service]) -> PriceRange {
    services.iter().map(service_price_range).sum()
}

/// Whether the aggregate minimum fits the budget.
///
/// Only the lower bound is checked, so a selection that "fits" may exceed the budget
/// at its top tier.
#[must_use]
pub fn fits_budget(services: &[Service], budget: f64) -> bool {
    aggregate_price_range(services).min <= budget
}

/// The priciest package within `allocated_budget`, or the cheapest package when none
/// fit. Returns `None` only for a service without packages.
#[must_use]
pub fn best_affordable_package(service: &Service, allocated_budget: f64) -> Option<&ServicePackage> {
    let mut best: Option<&ServicePackage> = None;
    let mut cheapest: Option<&ServicePackage> = None;

    for package in &service.packages {
        let price = package.resolved_base_price();
        if price <= allocated_budget
            && best.is_none_or(|b| price > b.resolved_base_price())
        {
            best = Some(package);
        }
        if cheapest.is_none_or(|c| price < c.resolved_base_price()) {
            cheapest = Some(package);
        }
    }

    best.or(cheapest)
}

/// Applies a discount fraction to both bounds.
///
/// `savings` is computed on the spread before the discount is applied.
#[must_use]
pub fn apply_tier_discount(range: PriceRange, discount: f64) -> DiscountedRange {
    let factor = 1.0 - discount;
    DiscountedRange {
        min: range.min * factor,
        max: range.max * factor,
        savings: (range.max - range.min) * discount,
    }
}

/// Offers every tier in the policy over the combined range of `services`.
#[must_use]
pub fn tier_bundles(services: &[Service], budget: f64, policy: &PricingPolicy) -> Vec<TierBundle> {
    let range = aggregate_price_range(services);
    policy
        .tiers
        .iter()
        .map(|tier| {
            let price = apply_tier_discount(range, tier.discount);
            TierBundle {
                tier: tier.name.clone(),
                discount: tier.discount,
                price,
                fits_budget: price.min <= budget,
            }
        })
        .collect()
}

/// Splits `budget` across services in proportion to their minimum price and picks the
/// best affordable package for each share.
///
/// When every minimum is 0 the budget is split evenly.
#[must_use]
pub fn recommend_packages(services: &[Service], budget: f64) -> Vec<PackageRecommendation> {
    let total_min = aggregate_price_range(services).min;
    #[allow(clippy::cast_precision_loss)]
    let even_share = budget / services.len().max(1) as f64;

    services
        .iter()
        .map(|service| {
            let allocated_budget = if total_min > 0.0 {
                budget * service_price_range(service).min / total_min
            } else {
                even_share
            };
            PackageRecommendation {
                service_id: service.id.clone(),
                allocated_budget,
                package: best_affordable_package(service, allocated_budget).cloned(),
            }
        })
        .collect()
}

fn positive(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}
