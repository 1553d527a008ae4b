//! Unified error types for the booking and pricing core.
//!
//! State-machine and pricing-rule failures are returned as values so the caller can
//! show an actionable message. Amount coercion problems are recovered in
//! [`crate::core::amount`] and only ever logged.

use serde::Serialize;
use thiserror::Error;

use crate::core::status::BookingStatus;

/// All errors produced by this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested status is not reachable from the current one
    #[error("Cannot move booking from '{from}' to '{to}'")]
    InvalidTransition {
        /// Status the booking is in
        from: BookingStatus,
        /// Status that was requested
        to: BookingStatus,
    },

    /// Entering `quote_sent` without any line items
    #[error("A quote with at least one line item is required to send a quote")]
    MissingQuotePayload,

    /// Pricing rule could not be evaluated
    #[error("Invalid pricing rule '{rule_type}': {reason}")]
    InvalidPricingRule {
        /// Rule type label as stored
        rule_type: String,
        /// Why evaluation was refused
        reason: String,
        /// The clamped or rejected quantity, when the failure is about bounds
        value: Option<f64>,
    },

    /// A stored commercial field that is not a usable number
    #[error("Malformed amount in field '{field}': {raw:?}")]
    MalformedAmount {
        /// Name of the booking field
        field: &'static str,
        /// Raw value as found in storage
        raw: String,
    },

    /// An amount supplied by the caller is negative, zero or not finite
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Service catalog breaks one of its invariants
    #[error("Invalid catalog: {message}")]
    InvalidCatalog {
        /// Description of the broken invariant
        message: String,
    },

    /// The booking changed underneath the caller
    #[error("Booking '{booking_id}' was modified by someone else")]
    StaleBooking {
        /// Booking identifier
        booking_id: String,
    },

    /// No booking with this id
    #[error("Booking not found: {id}")]
    BookingNotFound {
        /// Booking identifier
        id: String,
    },

    /// No service with this id
    #[error("Service not found: {id}")]
    ServiceNotFound {
        /// Service identifier
        id: String,
    },

    /// Configuration could not be loaded or is inconsistent
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable reason
        message: String,
    },

    /// Database error from `SeaORM`
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// JSON encoding error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable error
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),
}

/// Stable error classification exposed across the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorKind {
    /// See [`Error::InvalidTransition`]
    InvalidTransition,
    /// See [`Error::MissingQuotePayload`]
    MissingQuotePayload,
    /// See [`Error::InvalidPricingRule`]
    InvalidPricingRule,
    /// See [`Error::MalformedAmount`]
    MalformedAmount,
    /// See [`Error::InvalidAmount`]
    InvalidAmount,
    /// See [`Error::InvalidCatalog`]
    InvalidCatalog,
    /// See [`Error::StaleBooking`]
    StaleBooking,
    /// Booking or service lookup failed
    NotFound,
    /// Anything from configuration, storage or the environment
    Internal,
}

impl ErrorKind {
    /// Whether the user can act on this error (retry with other input).
    ///
    /// Non-actionable kinds mean data is unavailable and the UI should fall back
    /// to a partial view.
    #[must_use]
    pub const fn is_actionable(self) -> bool {
        matches!(
            self,
            Self::InvalidTransition
                | Self::MissingQuotePayload
                | Self::InvalidPricingRule
                | Self::InvalidAmount
                | Self::StaleBooking
        )
    }
}

impl Error {
    /// Classifies this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTransition { .. } => ErrorKind::InvalidTransition,
            Self::MissingQuotePayload => ErrorKind::MissingQuotePayload,
            Self::InvalidPricingRule { .. } => ErrorKind::InvalidPricingRule,
            Self::MalformedAmount { .. } => ErrorKind::MalformedAmount,
            Self::InvalidAmount { .. } => ErrorKind::InvalidAmount,
            Self::InvalidCatalog { .. } => ErrorKind::InvalidCatalog,
            Self::StaleBooking { .. } => ErrorKind::StaleBooking,
            Self::BookingNotFound { .. } | Self::ServiceNotFound { .. } => ErrorKind::NotFound,
            Self::Config { .. }
            | Self::Database(_)
            | Self::Serialization(_)
            | Self::Io(_)
            | Self::EnvVar(_) => ErrorKind::Internal,
        }
    }
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
