//! Service add-on entity - An optional extra priced on its own.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Service add-on database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service_addons")]
pub struct Model {
    /// Unique identifier for the add-on
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Service this add-on belongs to
    pub service_id: String,
    /// Display name, e.g. `"Extra Hour"`
    pub addon_name: String,
    /// Price of the add-on
    pub addon_price: Option<f64>,
}

/// Defines relationships between `ServiceAddon` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each add-on belongs to one service
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
