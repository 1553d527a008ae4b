//! Service package entity - A named pricing tier of a service.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service package database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_packages")]
pub struct Model {
    /// Unique identifier for the package
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Service this package belongs to
    pub service_id: String,
    /// Display name, e.g. `"Premium"`
    pub package_name: String,
    /// Listed price
    pub base_price: Option<f64>,
    /// Whether this is the package shown by default
    pub is_default: bool,
}

/// Defines relationships between `ServicePackage` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each package belongs to one service
    #[sea_orm(
        belongs_to = "super::service::Entity",
        from = "Column::ServiceId",
        to = "super::service::Column::Id"
    )]
    Service,
    /// One package has many line items
    #[sea_orm(has_many = "super::package_item::Entity")]
    Items,
}

impl Related<super::service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Service.def()
    }
}

impl Related<super::package_item::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Items.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
