//! Request/response boundary for booking status changes and the couple dashboard.
//!
//! Callers send a [`StatusChangeRequest`] with the status they last saw. The change is
//! applied only if the booking is still in that status, and the result comes back as a
//! [`StatusChangeOutcome`] carrying either the new booking or a classified error.

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use crate::{
    config::AppConfig,
    core::{
        booking::{Booking, QuotePayload, transition_at},
        dashboard::{Dashboard, compute_dashboard},
        status::BookingStatus,
    },
    errors::{Error, ErrorKind, Result},
    store,
};

/// A status change as submitted by a vendor or couple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeRequest {
    /// Booking to change
    pub booking_id: String,
    /// Status the caller believes the booking is in
    pub current_status: BookingStatus,
    /// Status to move to
    pub requested_status: BookingStatus,
    /// Quote details, required when sending a quote
    #[serde(default)]
    pub quote_payload: Option<QuotePayload>,
}

/// Result of a status change, ready to serialize back to the caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusChangeOutcome {
    /// Whether the change was applied
    pub ok: bool,
    /// The updated booking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub booking: Option<Booking>,
    /// Error classification on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
    /// Human-readable error on failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl StatusChangeOutcome {
    fn success(booking: Booking) -> Self {
        Self {
            ok: true,
            booking: Some(booking),
            error_kind: None,
            message: None,
        }
    }

    fn failure(err: &Error) -> Self {
        Self {
            ok: false,
            booking: None,
            error_kind: Some(err.kind()),
            message: Some(err.to_string()),
        }
    }
}

impl From<Result<Booking>> for StatusChangeOutcome {
    fn from(result: Result<Booking>) -> Self {
        match result {
            Ok(booking) => Self::success(booking),
            Err(err) => Self::failure(&err),
        }
    }
}

/// Applies a request to an already loaded booking.
///
/// # Errors
/// Returns [`Error::StaleBooking`] if the request names another booking or a status the
/// booking is no longer in, otherwise whatever [`transition_at`] returns.
pub fn apply_status_change(
    booking: &Booking,
    request: StatusChangeRequest,
    now: DateTime<Utc>,
) -> Result<Booking> {
    if request.booking_id != booking.id || request.current_status != booking.status {
        return Err(Error::StaleBooking {
            booking_id: request.booking_id,
        });
    }
    transition_at(booking, request.requested_status, request.quote_payload, now)
}

/// Loads the booking, applies the request and persists it.
///
/// Every failure is reported in the outcome rather than as an `Err`.
#[instrument(skip(db, request), fields(booking_id = %request.booking_id, to = %request.requested_status))]
pub async fn change_booking_status(
    db: &DatabaseConnection,
    request: StatusChangeRequest,
    now: DateTime<Utc>,
) -> StatusChangeOutcome {
    let result = async {
        let before = store::get_booking(db, &request.booking_id).await?;
        let after = apply_status_change(&before, request, now)?;
        store::persist_transition(db, &before, &after).await?;
        Ok::<_, Error>(after)
    }
    .await;

    match &result {
        Ok(booking) => info!(status = %booking.status, "Status change applied"),
        Err(err) if err.kind().is_actionable() => info!(%err, "Status change refused"),
        Err(err) => error!(%err, "Status change failed"),
    }
    result.into()
}

/// Builds the dashboard for one couple from their stored bookings.
///
/// # Errors
/// Returns a database error if the bookings cannot be queried.
pub async fn couple_dashboard(
    db: &DatabaseConnection,
    couple_id: &str,
    config: &AppConfig,
    now: DateTime<Utc>,
) -> Result<Dashboard> {
    let bookings = store::load_couple_bookings(db, couple_id).await?;
    Ok(compute_dashboard(&bookings, now, &config.dashboard))
}
