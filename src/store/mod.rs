//! Store layer - loads and saves core records through `SeaORM`.
//!
//! This is the only place that touches the database. Rows are normalized into the
//! canonical types of [`crate::core`] here: text amounts stay raw until
//! [`crate::core::amount::resolve_amount`], status and rule labels are parsed, and rows
//! that cannot be understood are logged and skipped instead of failing a whole listing.

/// Booking persistence and optimistic transition writes
pub mod bookings;
/// Service catalog loading and saving
pub mod services;

pub use bookings::{get_booking, insert_booking, load_couple_bookings, persist_transition};
pub use services::{load_service, load_services, save_service};
