//! Commercial amount resolution.
//!
//! Stored amounts arrive either as numbers or as decimal strings (the way many SQL
//! drivers hand back `DECIMAL` columns). [`resolve_amount`] is the single place where a
//! booking's authoritative amount is derived; dirty values are logged and counted as 0.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{core::booking::Booking, errors::Error};

/// A commercial field as found in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AmountField {
    /// Numeric column or JSON number
    Number(f64),
    /// Text column or JSON string, parsed on use
    Text(String),
}

impl AmountField {
    /// Parses the value as a non-negative finite number.
    ///
    /// # Errors
    /// Returns [`Error::MalformedAmount`] for text that is not a number, and for
    /// negative or non-finite values.
    pub fn parse(&self, field: &'static str) -> Result<f64, Error> {
        let malformed = |raw: String| Error::MalformedAmount { field, raw };
        let value = match self {
            Self::Number(n) => *n,
            Self::Text(s) => {
                let trimmed = s.trim();
                if trimmed.is_empty() {
                    return Ok(0.0);
                }
                trimmed
                    .replace(',', "")
                    .parse::<f64>()
                    .map_err(|_| malformed(s.clone()))?
            }
        };

        if !value.is_finite() || value < 0.0 {
            return Err(malformed(value.to_string()));
        }
        Ok(value)
    }
}

impl From<f64> for AmountField {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for AmountField {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

/// Coerces one optional field to a number, logging and zeroing malformed input.
#[must_use]
pub fn coerce_field(booking_id: &str, field: &'static str, value: Option<&AmountField>) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    match value.parse(field) {
        Ok(n) => n,
        Err(err) => {
            warn!(booking_id, %err, "Treating malformed amount as 0");
            0.0
        }
    }
}

/// Resolves the authoritative amount of a booking.
///
/// Priority is `final_price`, `quoted_price`, `downpayment_amount`, `total_paid`.
/// The first field with a positive value wins; missing, zero and malformed fields
/// fall through. The result is always finite and non-negative.
#[must_use]
pub fn resolve_amount(booking: &Booking) -> f64 {
    let fields = [
        ("final_price", booking.final_price.as_ref()),
        ("quoted_price", booking.quoted_price.as_ref()),
        ("downpayment_amount", booking.downpayment_amount.as_ref()),
        ("total_paid", booking.total_paid.as_ref()),
    ];

    fields
        .into_iter()
        .map(|(field, value)| coerce_field(&booking.id, field, value))
        .find(|amount| *amount > 0.0)
        .unwrap_or(0.0)
}
