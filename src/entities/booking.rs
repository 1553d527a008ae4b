//! Booking entity - One vendor-couple engagement.
//!
//! Commercial columns are stored as text, the same way `DECIMAL` columns come back from
//! most SQL drivers, and are parsed when converted into a core booking.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Booking database model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    /// Opaque booking identifier
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    /// Couple who requested the booking
    pub couple_id: String,
    /// Vendor providing the service
    pub vendor_id: String,
    /// Vendor business name, denormalized for listing
    pub vendor_name: Option<String>,
    /// Booked service
    pub service_id: Option<String>,
    /// Service display name
    pub service_name: Option<String>,
    /// Service category
    pub service_type: Option<String>,
    /// Event location
    pub location: Option<String>,
    /// Event day
    pub event_date: Option<Date>,
    /// Event start time as entered (`"15:00"`)
    pub event_time: Option<String>,
    /// When the booking was requested
    pub created_at: DateTimeUtc,
    /// Last modification
    pub updated_at: DateTimeUtc,
    /// Latest quote total
    pub quoted_price: Option<String>,
    /// Agreed final price
    pub final_price: Option<String>,
    /// Deposit received
    pub downpayment_amount: Option<String>,
    /// Sum of payments received
    pub total_paid: Option<String>,
    /// Status label (`"quote_sent"`)
    pub status: String,
    /// Latest quote as JSON
    pub quote_json: Option<String>,
}

/// `Booking` relations are resolved by the store, not through `SeaORM`
#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
