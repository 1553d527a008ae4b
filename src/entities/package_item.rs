//! Package item entity - A billable line of a package (personnel, equipment, deliverable).
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Package item database model
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "package_items")]
pub struct Model {
    /// Unique identifier for the item
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Package this item belongs to
    pub package_id: String,
    /// `"personnel"`, `"equipment"`, `"deliverable"` or `"other"`
    pub item_type: String,
    /// Display name
    pub item_name: String,
    /// Units included
    pub quantity: f64,
    /// Unit label, e.g. `"hours"`
    pub unit_type: Option<String>,
    /// Value of one unit
    pub unit_value: Option<f64>,
}

/// Defines relationships between `PackageItem` and other entities
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    /// Each item belongs to one package
    #[sea_orm(
        belongs_to = "super::service_package::Entity",
        from = "Column::PackageId",
        to = "super::service_package::Column::Id"
    )]
    Package,
}

impl Related<super::service_package::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Package.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
