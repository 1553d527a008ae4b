//! Booking persistence.
//!
//! Transitions are computed in [`crate::core::booking`] and written back here with an
//! optimistic check: the update only applies if the row still has the status and
//! `updated_at` of the snapshot the transition was computed from.

use crate::{
    core::{
        amount::AmountField,
        booking::{Booking, QuotePayload},
        status::BookingStatus,
    },
    entities::{BookingEntity, booking},
    errors::{Error, Result},
};
use sea_orm::{QueryOrder, Set, prelude::*, sea_query::Expr};
use tracing::{debug, instrument, warn};

fn amount_to_column(value: Option<&AmountField>) -> Option<String> {
    value.map(|amount| match amount {
        AmountField::Number(n) => n.to_string(),
        AmountField::Text(s) => s.clone(),
    })
}

fn amount_from_column(value: Option<String>) -> Option<AmountField> {
    value.map(AmountField::Text)
}

fn quote_to_column(quote: Option<&QuotePayload>) -> Result<Option<String>> {
    quote
        .map(serde_json::to_string)
        .transpose()
        .map_err(Into::into)
}

/// Converts a stored row into a core booking.
///
/// A quote column that does not parse is logged and dropped; the booking itself is kept.
///
/// # Errors
/// Returns a database error if the status label is not recognized.
pub fn booking_from_model(model: booking::Model) -> Result<Booking> {
    let status = BookingStatus::from_label(&model.status).ok_or_else(|| {
        Error::Database(DbErr::Custom(format!(
            "booking '{}' has unknown status '{}'",
            model.id, model.status
        )))
    })?;

    let quote: Option<QuotePayload> = model.quote_json.as_deref().and_then(|json| {
        serde_json::from_str(json)
            .inspect_err(|e| warn!(booking_id = %model.id, error = %e, "Dropping unreadable quote"))
            .ok()
    });

    Ok(Booking {
        id: model.id,
        couple_id: model.couple_id,
        vendor_id: model.vendor_id,
        vendor_name: model.vendor_name,
        service_id: model.service_id,
        service_name: model.service_name,
        service_type: model.service_type,
        location: model.location,
        event_date: model.event_date,
        event_time: model.event_time,
        created_at: model.created_at,
        updated_at: model.updated_at,
        quoted_price: amount_from_column(model.quoted_price),
        final_price: amount_from_column(model.final_price),
        downpayment_amount: amount_from_column(model.downpayment_amount),
        total_paid: amount_from_column(model.total_paid),
        status,
        quote,
    })
}

/// Inserts a new booking.
///
/// # Errors
/// Returns a database error, e.g. when the id already exists.
#[instrument(skip(db, booking), fields(booking_id = %booking.id))]
pub async fn insert_booking(db: &DatabaseConnection, booking: &Booking) -> Result<()> {
    let model = booking::ActiveModel {
        id: Set(booking.id.clone()),
        couple_id: Set(booking.couple_id.clone()),
        vendor_id: Set(booking.vendor_id.clone()),
        vendor_name: Set(booking.vendor_name.clone()),
        service_id: Set(booking.service_id.clone()),
        service_name: Set(booking.service_name.clone()),
        service_type: Set(booking.service_type.clone()),
        location: Set(booking.location.clone()),
        event_date: Set(booking.event_date),
        event_time: Set(booking.event_time.clone()),
        created_at: Set(booking.created_at),
        updated_at: Set(booking.updated_at),
        quoted_price: Set(amount_to_column(booking.quoted_price.as_ref())),
        final_price: Set(amount_to_column(booking.final_price.as_ref())),
        downpayment_amount: Set(amount_to_column(booking.downpayment_amount.as_ref())),
        total_paid: Set(amount_to_column(booking.total_paid.as_ref())),
        status: Set(booking.status.as_label().to_string()),
        quote_json: Set(quote_to_column(booking.quote.as_ref())?),
    };

    BookingEntity::insert(model).exec(db).await?;
    Ok(())
}

/// Retrieves a booking by id.
///
/// # Errors
/// Returns [`Error::BookingNotFound`] if no such booking exists, or a database error.
pub async fn get_booking(db: &DatabaseConnection, booking_id: &str) -> Result<Booking> {
    let model = BookingEntity::find_by_id(booking_id.to_string())
        .one(db)
        .await?
        .ok_or_else(|| Error::BookingNotFound {
            id: booking_id.to_string(),
        })?;
    booking_from_model(model)
}

/// Retrieves all bookings of a couple, newest first.
///
/// Rows that cannot be converted are logged and skipped so the dashboard still renders.
///
/// # Errors
/// Returns an error only if the query itself fails.
#[instrument(skip(db))]
pub async fn load_couple_bookings(db: &DatabaseConnection, couple_id: &str) -> Result<Vec<Booking>> {
    let models = BookingEntity::find()
        .filter(booking::Column::CoupleId.eq(couple_id))
        .order_by_desc(booking::Column::CreatedAt)
        .all(db)
        .await?;

    let total = models.len();
    let bookings: Vec<Booking> = models
        .into_iter()
        .filter_map(|model| {
            booking_from_model(model)
                .inspect_err(|e| warn!(error = %e, "Skipping unreadable booking"))
                .ok()
        })
        .collect();

    debug!(total, loaded = bookings.len(), "Loaded couple bookings");
    Ok(bookings)
}

/// Writes a transition computed from `before`.
///
/// # Errors
/// Returns [`Error::StaleBooking`] if the stored row no longer matches `before`
/// (another writer got there first), or a database error.
#[instrument(skip(db, before, after), fields(booking_id = %before.id, to = %after.status))]
pub async fn persist_transition(
    db: &DatabaseConnection,
    before: &Booking,
    after: &Booking,
) -> Result<()> {
    let result = BookingEntity::update_many()
        .col_expr(booking::Column::Status, Expr::value(after.status.as_label()))
        .col_expr(booking::Column::UpdatedAt, Expr::value(after.updated_at))
        .col_expr(
            booking::Column::QuotedPrice,
            Expr::value(amount_to_column(after.quoted_price.as_ref())),
        )
        .col_expr(
            booking::Column::FinalPrice,
            Expr::value(amount_to_column(after.final_price.as_ref())),
        )
        .col_expr(
            booking::Column::DownpaymentAmount,
            Expr::value(amount_to_column(after.downpayment_amount.as_ref())),
        )
        .col_expr(
            booking::Column::TotalPaid,
            Expr::value(amount_to_column(after.total_paid.as_ref())),
        )
        .col_expr(
            booking::Column::QuoteJson,
            Expr::value(quote_to_column(after.quote.as_ref())?),
        )
        .filter(booking::Column::Id.eq(before.id.as_str()))
        .filter(booking::Column::Status.eq(before.status.as_label()))
        .filter(booking::Column::UpdatedAt.eq(before.updated_at))
        .exec(db)
        .await?;

    if result.rows_affected == 0 {
        return Err(Error::StaleBooking {
            booking_id: before.id.clone(),
        });
    }
    Ok(())
}
