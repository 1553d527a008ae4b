//! Service pricing rule entity - Quantity-based pricing formula of a service.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service pricing rule database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_pricing_rules")]
pub struct Model {
    /// Unique identifier for the rule
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Service this rule belongs to
    pub service_id: String,
    /// `"hourly"`, `"per_pax"`, `"daily"`, `"tiered"`, `"bulk_discount"` or `"seasonal"`
    pub rule_type: String,
    /// Units covered by the base price
    pub base_unit: f64,
    /// Price of the base block
    pub base_price: f64,
    /// Price per unit beyond the base block
    pub additional_unit_price: Option<f64>,
    /// Smallest bookable quantity
    pub minimum_units: Option<f64>,
    /// Largest bookable quantity
    pub maximum_units: Option<f64>,
    /// Inactive rules are kept but never evaluated
    pub is_active: bool,
}

/// Defines relationships between `ServicePricingRule` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each rule belongs to one service
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id"
    )]
    Service,
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
