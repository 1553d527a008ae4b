//! Booking records and the status transition operation.
//!
//! A [`Booking`] is never mutated in place: [`transition`] and [`record_payment`]
//! take a snapshot and return a new record, leaving persistence (and any
//! concurrency check) to the caller.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    core::{
        amount::{AmountField, coerce_field},
        catalog::{ItemType, ServiceAddon, ServicePackage},
        status::{BookingStatus, can_transition},
    },
    errors::{Error, Result},
};

/// One vendor-couple engagement for a service.
///
/// Field names are camelCase on the wire; snake_case aliases are accepted so rows
/// exported straight from storage deserialize into the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    /// Opaque identifier
    pub id: String,
    #[serde(alias = "couple_id")]
    /// Couple who requested the booking
    pub couple_id: String,
    #[serde(alias = "vendor_id")]
    /// Vendor providing the service
    pub vendor_id: String,
    #[serde(default, alias = "vendor_name", alias = "businessName")]
    /// Vendor display name, when joined in
    pub vendor_name: Option<String>,
    #[serde(default, alias = "service_id")]
    /// Service being booked
    pub service_id: Option<String>,
    #[serde(default, alias = "service_name")]
    /// Service display name
    pub service_name: Option<String>,
    #[serde(default, alias = "service_type", alias = "category")]
    /// Service category used for budget grouping
    pub service_type: Option<String>,
    #[serde(default, alias = "event_location")]
    /// Where the event takes place
    pub location: Option<String>,
    #[serde(default, alias = "event_date")]
    /// Day of the event
    pub event_date: Option<NaiveDate>,
    #[serde(default, alias = "event_time")]
    /// Local start time as entered by the couple
    pub event_time: Option<String>,
    #[serde(alias = "created_at")]
    /// When the booking was requested
    pub created_at: DateTime<Utc>,
    #[serde(alias = "updated_at")]
    /// Last transition time
    pub updated_at: DateTime<Utc>,
    #[serde(default, alias = "quoted_price", alias = "quote_amount")]
    /// Total of the latest quote
    pub quoted_price: Option<AmountField>,
    #[serde(default, alias = "final_price")]
    /// Agreed final price
    pub final_price: Option<AmountField>,
    #[serde(default, alias = "downpayment_amount", alias = "deposit_amount")]
    /// Deposit received
    pub downpayment_amount: Option<AmountField>,
    #[serde(default, alias = "total_paid")]
    /// Sum of all payments received
    pub total_paid: Option<AmountField>,
    /// Lifecycle state
    pub status: BookingStatus,
    #[serde(default)]
    /// Latest quote sent by the vendor
    pub quote: Option<QuotePayload>,
}

/// A single billable line of a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItem {
    /// What is being billed
    pub name: String,
    #[serde(default)]
    /// Kind of line, when it came from a package item
    pub item_type: Option<ItemType>,
    /// Number of units
    pub quantity: f64,
    #[serde(alias = "unit_price")]
    /// Price per unit
    pub unit_price: f64,
}

impl QuoteLineItem {
    /// `quantity * unit_price`
    #[must_use]
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// Itemized quote a vendor sends to a couple.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotePayload {
    /// Quote lines; must not be empty when sending a quote
    pub items: Vec<QuoteLineItem>,
    /// Quoted total (may differ from the item sum when the vendor discounts)
    pub total: f64,
    #[serde(default)]
    /// Free-form note from the vendor
    pub notes: Option<String>,
}

impl QuotePayload {
    /// Builds a quote from a package's line items plus selected add-ons.
    ///
    /// The total is the package's resolved base price plus the add-on prices, so an
    /// itemized breakdown never changes what the couple saw on the listing.
    #[must_use]
    pub fn from_package(package: &ServicePackage, addons: &[ServiceAddon]) -> Self {
        let mut items: Vec<QuoteLineItem> = package
            .items
            .iter()
            .map(|item| QuoteLineItem {
                name: item.name.clone(),
                item_type: Some(item.item_type),
                quantity: item.quantity,
                unit_price: item.unit_value.unwrap_or(0.0),
            })
            .collect();

        if items.is_empty() {
            items.push(QuoteLineItem {
                name: package.name.clone(),
                item_type: None,
                quantity: 1.0,
                unit_price: package.resolved_base_price(),
            });
        }

        for addon in addons {
            items.push(QuoteLineItem {
                name: addon.name.clone(),
                item_type: Some(ItemType::Other),
                quantity: 1.0,
                unit_price: addon.resolved_price(),
            });
        }

        let total = package.resolved_base_price()
            + addons.iter().map(ServiceAddon::resolved_price).sum::<f64>();

        Self {
            items,
            total,
            notes: None,
        }
    }

    /// Sum of all line totals.
    #[must_use]
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(QuoteLineItem::line_total).sum()
    }
}

/// Kind of confirmed payment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentKind {
    /// First partial payment after confirmation
    Deposit,
    /// Remaining balance
    Full,
}

/// Opaque "payment confirmed" event from the payment gateway.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PaymentConfirmed {
    /// Deposit or full payment
    pub kind: PaymentKind,
    /// Amount received in this payment
    pub amount: f64,
}

/// Applies a status transition at the current time.
///
/// # Errors
/// See [`transition_at`].
pub fn transition(
    booking: &Booking,
    next: BookingStatus,
    payload: Option<QuotePayload>,
) -> Result<Booking> {
    transition_at(booking, next, payload, Utc::now())
}

/// Applies a status transition, stamping `updated_at` with `now`.
///
/// Entering a quote-bearing status with a payload copies the quote total into
/// `quoted_price`. The input booking is never modified.
///
/// # Errors
/// - [`Error::InvalidTransition`] if `next` is not reachable from the current status
/// - [`Error::MissingQuotePayload`] when entering `quote_sent` without line items
/// - [`Error::InvalidAmount`] if the quote total is negative or not finite
pub fn transition_at(
    booking: &Booking,
    next: BookingStatus,
    payload: Option<QuotePayload>,
    now: DateTime<Utc>,
) -> Result<Booking> {
    let current = booking.status;
    if !can_transition(current, next) {
        return Err(Error::InvalidTransition {
            from: current,
            to: next,
        });
    }

    if next == BookingStatus::QuoteSent {
        match &payload {
            Some(quote) if !quote.items.is_empty() => {}
            _ => return Err(Error::MissingQuotePayload),
        }
    }

    let mut updated = booking.clone();
    updated.status = next;
    updated.updated_at = now;

    if let Some(quote) = payload {
        if next.is_quote_bearing() {
            if !quote.total.is_finite() || quote.total < 0.0 {
                return Err(Error::InvalidAmount {
                    amount: quote.total,
                });
            }
            updated.quoted_price = Some(AmountField::Number(quote.total));
            updated.quote = Some(quote);
        } else {
            debug!(booking_id = %booking.id, %next, "Ignoring quote payload on non-quote transition");
        }
    }

    info!(booking_id = %booking.id, from = %current, to = %next, "Booking transitioned");
    Ok(updated)
}

/// Applies a confirmed payment at the current time.
///
/// # Errors
/// See [`record_payment_at`].
pub fn record_payment(booking: &Booking, payment: PaymentConfirmed) -> Result<Booking> {
    record_payment_at(booking, payment, Utc::now())
}

/// Applies a confirmed payment as a transition.
///
/// A deposit moves the booking to `downpayment_paid` and records the deposit; a full
/// payment moves it to `paid_in_full`. Both add the payment to `total_paid`.
///
/// # Errors
/// - [`Error::InvalidAmount`] if the amount is not a positive finite number
/// - [`Error::InvalidTransition`] if the booking is not in a state that accepts the payment
pub fn record_payment_at(
    booking: &Booking,
    payment: PaymentConfirmed,
    now: DateTime<Utc>,
) -> Result<Booking> {
    if !payment.amount.is_finite() || payment.amount <= 0.0 {
        return Err(Error::InvalidAmount {
            amount: payment.amount,
        });
    }

    let next = match payment.kind {
        PaymentKind::Deposit => BookingStatus::DownpaymentPaid,
        PaymentKind::Full => BookingStatus::PaidInFull,
    };
    let mut updated = transition_at(booking, next, None, now)?;

    let paid_so_far = if booking.total_paid.is_some() {
        coerce_field(&booking.id, "total_paid", booking.total_paid.as_ref())
    } else {
        coerce_field(
            &booking.id,
            "downpayment_amount",
            booking.downpayment_amount.as_ref(),
        )
    };

    if payment.kind == PaymentKind::Deposit {
        updated.downpayment_amount = Some(AmountField::Number(payment.amount));
    }
    updated.total_paid = Some(AmountField::Number(paid_so_far + payment.amount));

    Ok(updated)
}
