//! Shared test utilities.
//!
//! This module provides fixtures with sensible defaults for bookings and service
//! catalogs, plus an in-memory `SQLite` database for store tests.
#![allow(clippy::unwrap_used)]

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    core::{
        amount::AmountField,
        booking::{Booking, QuoteLineItem, QuotePayload},
        catalog::{ItemType, PackageItem, PricingRule, RuleType, Service, ServiceAddon, ServicePackage},
        status::BookingStatus,
    },
    errors::Result,
};

/// Creates an in-memory `SQLite` database with all tables initialized.
pub async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = sea_orm::Database::connect("sqlite::memory:").await?;
    crate::config::database::create_tables(&db).await?;
    Ok(db)
}

/// The reference "now" used by time-dependent tests.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 14, 10, 0, 0).unwrap()
}

/// Creates a booking with sensible defaults.
///
/// # Defaults
/// * couple `c1`, vendor `v1`, service `s1` of type "Photography"
/// * event on 2026-06-20, created three days before [`fixed_now`]
/// * no amounts
#[must_use]
pub fn sample_booking(id: &str, status: BookingStatus) -> Booking {
    let created = fixed_now() - Duration::days(3);
    Booking {
        id: id.to_string(),
        couple_id: "c1".to_string(),
        vendor_id: "v1".to_string(),
        vendor_name: None,
        service_id: Some("s1".to_string()),
        service_name: None,
        service_type: Some("Photography".to_string()),
        location: None,
        event_date: NaiveDate::from_ymd_opt(2026, 6, 20),
        event_time: Some("15:00".to_string()),
        created_at: created,
        updated_at: created,
        quoted_price: None,
        final_price: None,
        downpayment_amount: None,
        total_paid: None,
        status,
        quote: None,
    }
}

/// A mix of bookings across every bucket, with amounts set.
#[must_use]
pub fn sample_bookings() -> Vec<Booking> {
    let mut request = sample_booking("b-request", BookingStatus::Request);
    request.service_type = Some("Catering".to_string());

    let mut quoted = sample_booking("b-quoted", BookingStatus::QuoteSent);
    quoted.quoted_price = Some(AmountField::Number(45000.0));
    quoted.created_at = fixed_now() - Duration::hours(5);

    let mut confirmed = sample_booking("b-confirmed", BookingStatus::DownpaymentPaid);
    confirmed.quoted_price = Some(AmountField::Text("120000.00".to_string()));
    confirmed.downpayment_amount = Some(AmountField::Number(30000.0));
    confirmed.vendor_name = Some("Lens & Light".to_string());

    let mut completed = sample_booking("b-completed", BookingStatus::Completed);
    completed.final_price = Some(AmountField::Number(75000.0));
    completed.service_type = Some("Venue".to_string());
    completed.event_date = NaiveDate::from_ymd_opt(2026, 1, 10);

    let mut cancelled = sample_booking("b-cancelled", BookingStatus::Cancelled);
    cancelled.quoted_price = Some(AmountField::Text("oops".to_string()));

    vec![request, quoted, confirmed, completed, cancelled]
}

/// A quote with one line item summing to `total`.
#[must_use]
pub fn sample_quote(total: f64) -> QuotePayload {
    QuotePayload {
        items: vec![QuoteLineItem {
            name: "Coverage".to_string(),
            item_type: Some(ItemType::Personnel),
            quantity: 1.0,
            unit_price: total,
        }],
        total,
        notes: None,
    }
}

/// Creates a package without items.
#[must_use]
pub fn sample_package(id: &str, name: &str, base_price: Option<f64>, is_default: bool) -> ServicePackage {
    ServicePackage {
        id: id.to_string(),
        name: name.to_string(),
        base_price,
        is_default,
        items: Vec::new(),
    }
}

fn item(id: &str, name: &str, item_type: ItemType, quantity: f64, unit_value: f64) -> PackageItem {
    PackageItem {
        id: id.to_string(),
        name: name.to_string(),
        item_type,
        quantity,
        unit_type: None,
        unit_value: Some(unit_value),
    }
}

/// Unit rule: 8 base units for 50000, 5000 per extra unit, bounded to `[4, 16]`.
#[must_use]
pub fn sample_rule(id: &str, rule_type: RuleType) -> PricingRule {
    PricingRule {
        id: id.to_string(),
        rule_type,
        base_unit: 8.0,
        base_price: 50000.0,
        additional_unit_price: 5000.0,
        minimum_units: Some(4.0),
        maximum_units: Some(16.0),
        is_active: true,
    }
}

/// A photography service with three packages (60000 default, 120000, 180000), one
/// add-on at 5000 and one hourly rule.
#[must_use]
pub fn sample_service() -> Service {
    let mut basic = sample_package("p1-basic", "Basic", Some(60000.0), true);
    basic.items = vec![
        item("i1", "Photographer", ItemType::Personnel, 2.0, 15000.0),
        item("i2", "Photo album", ItemType::Deliverable, 1.0, 10000.0),
    ];
    let mut premium = sample_package("p2-premium", "Premium", Some(120000.0), false);
    premium.items = vec![
        item("i3", "Photographer", ItemType::Personnel, 3.0, 15000.0),
        item("i4", "Drone", ItemType::Equipment, 1.0, 20000.0),
        item("i5", "Photo album", ItemType::Deliverable, 2.0, 10000.0),
    ];
    let luxury = sample_package("p3-luxury", "Luxury", Some(180000.0), false);

    Service {
        id: "s1".to_string(),
        vendor_id: Some("v1".to_string()),
        name: "Wedding Photography".to_string(),
        service_type: Some("Photography".to_string()),
        base_price: None,
        minimum_price: None,
        maximum_price: None,
        packages: vec![basic, premium, luxury],
        addons: vec![ServiceAddon {
            id: "a1".to_string(),
            name: "Extra Hour".to_string(),
            price: Some(5000.0),
        }],
        pricing_rules: vec![sample_rule("r-hourly", RuleType::Hourly)],
    }
}
