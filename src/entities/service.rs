//! Service entity - A vendor's listed service and its flat price range.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "services")]
pub struct Model {
    /// Unique identifier for the service
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Owning vendor
    pub vendor_id: Option<String>,
    /// Display name
    pub service_name: String,
    /// Category, e.g. `"Photography"`
    pub service_type: Option<String>,
    /// Flat price used when the service has no packages
    pub base_price: Option<f64>,
    /// Lower bound of the flat price range
    pub minimum_price: Option<f64>,
    /// Upper bound of the flat price range
    pub maximum_price: Option<f64>,
}

/// Defines relationships between Service and its catalog tables
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// One service has many packages
    #[sea_orm(has_many = "super::service_package::Entity")]
    Packages,
    /// One service has many add-ons
    #[sea_orm(has_many = "super::service_addon::Entity")]
    Addons,
    /// One service has many pricing rules
    #[sea_orm(has_many = "super::service_pricing_rule::Entity")]
    PricingRules,
}

impl Related<super::service_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Packages.def()
    }
}

impl Related<super::service_addon::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Addons.def()
    }
}

impl Related<super::service_pricing_rule::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::PricingRules.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
