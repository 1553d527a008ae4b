//! Core business logic - framework-agnostic booking, pricing and dashboard operations.
//!
//! Nothing in here touches the database; the store layer converts rows into these
//! types and back.

pub mod amount;
pub mod booking;
pub mod catalog;
pub mod dashboard;
pub mod pricing;
pub mod rules;
pub mod status;
