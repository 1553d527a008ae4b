//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities mirror the stored booking and pricing tables. The store layer
//! converts them into the canonical types in [`crate::core`].

pub mod booking;
pub mod package_item;
pub mod service;
pub mod service_addon;
pub mod service_package;
pub mod service_pricing_rule;

// Re-export specific types to avoid conflicts
pub use booking::{Column as BookingColumn, Entity as BookingEntity, Model as BookingModel};
pub use package_item::{
    Column as PackageItemColumn, Entity as PackageItem, Model as PackageItemModel,
};
pub use service::{Column as ServiceColumn, Entity as ServiceEntity, Model as ServiceModel};
pub use service_addon::{
    Column as ServiceAddonColumn, Entity as ServiceAddon, Model as ServiceAddonModel,
};
pub use service_package::{
    Column as ServicePackageColumn, Entity as ServicePackage, Model as ServicePackageModel,
};
pub use service_pricing_rule::{
    Column as ServicePricingRuleColumn, Entity as ServicePricingRule,
    Model as ServicePricingRuleModel,
};
