//! Dashboard aggregation for the couple-facing overview.
//!
//! Everything here is recomputed from a slice of bookings on each call. Amounts come
//! from [`resolve_amount`] and status groupings from [`BookingStatus::bucket`].

use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::core::{
    amount::resolve_amount,
    booking::Booking,
    status::{BookingStatus, StatusBucket},
};

const DEFAULT_CATEGORY: &str = "Other";

/// Tunables for the dashboard heuristics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardSettings {
    /// Maximum number of activity entries
    pub activity_limit: usize,
    /// Smallest placeholder budget
    pub budget_floor: f64,
    /// Placeholder budget as a multiple of the amount spent
    pub budget_multiplier: f64,
    /// Per-category allocation as a multiple of the category spend
    pub category_headroom: f64,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            activity_limit: 10,
            budget_floor: 50_000.0,
            budget_multiplier: 1.5,
            category_headroom: 1.2,
        }
    }
}

/// Summary counters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Every booking, whatever its status
    pub total_bookings: usize,
    /// Bookings in the pending bucket
    pub pending_bookings: usize,
    /// Bookings in the confirmed bucket
    pub confirmed_bookings: usize,
    /// Completed bookings
    pub completed_bookings: usize,
    /// Sum of resolved amounts over all bookings
    pub total_spent: f64,
    /// Confirmed-bucket bookings with a future event date
    pub upcoming_events: usize,
}

/// Spend of one service category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BudgetCategory {
    /// Service type, `"Other"` when unknown
    pub category: String,
    /// Suggested allocation
    pub allocated: f64,
    /// Summed resolved amount
    pub spent: f64,
}

/// Budget overview.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Budget {
    /// Placeholder total budget
    pub total: f64,
    /// Summed resolved amount
    pub spent: f64,
    /// `total - spent`
    pub remaining: f64,
    /// Per-category breakdown, sorted by category name
    pub categories: Vec<BudgetCategory>,
}

/// One entry of the activity feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Activity {
    /// Booking the activity refers to
    pub booking_id: String,
    /// Short headline
    pub title: String,
    /// One-line description
    pub description: String,
    /// Icon name for the UI
    pub icon: &'static str,
    /// Color name for the UI
    pub color: &'static str,
    /// When the booking was created
    pub timestamp: DateTime<Utc>,
    /// Relative version of `timestamp`
    pub time_ago: String,
}

/// A confirmed event still ahead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEvent {
    /// Service name or type
    pub title: String,
    /// Event day
    pub date: NaiveDate,
    /// Event start time as entered
    pub time: Option<String>,
    /// Vendor display name
    pub vendor: String,
    /// Event location
    pub location: Option<String>,
    /// Booking identifier
    pub booking_id: String,
}

/// The full dashboard payload.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Summary counters
    pub stats: DashboardStats,
    /// Budget overview
    pub budget: Budget,
    /// Recent activity feed
    pub recent_activities: Vec<Activity>,
    /// Upcoming confirmed events
    pub upcoming_events: Vec<UpcomingEvent>,
}

fn is_upcoming(booking: &Booking, today: NaiveDate) -> bool {
    booking.status.bucket() == StatusBucket::Confirmed
        && booking.event_date.is_some_and(|date| date > today)
}

fn service_label(booking: &Booking) -> &str {
    booking
        .service_name
        .as_deref()
        .or(booking.service_type.as_deref())
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("Wedding service")
}

fn vendor_label(booking: &Booking) -> &str {
    booking
        .vendor_name
        .as_deref()
        .filter(|s| !s.trim().is_empty())
        .unwrap_or("your vendor")
}

/// Computes the summary counters.
#[must_use]
pub fn compute_stats(bookings: &[Booking], now: DateTime<Utc>) -> DashboardStats {
    let today = now.date_naive();
    let mut stats = DashboardStats {
        total_bookings: bookings.len(),
        pending_bookings: 0,
        confirmed_bookings: 0,
        completed_bookings: 0,
        total_spent: 0.0,
        upcoming_events: 0,
    };

    for booking in bookings {
        match booking.status.bucket() {
            StatusBucket::Pending => stats.pending_bookings += 1,
            StatusBucket::Confirmed => stats.confirmed_bookings += 1,
            StatusBucket::Completed => stats.completed_bookings += 1,
            StatusBucket::Other => {}
        }
        stats.total_spent += resolve_amount(booking);
        if is_upcoming(booking, today) {
            stats.upcoming_events += 1;
        }
    }

    stats
}

/// Computes the budget overview and per-category breakdown.
#[must_use]
pub fn compute_budget(bookings: &[Booking], settings: &DashboardSettings) -> Budget {
    let mut by_category: BTreeMap<&str, f64> = BTreeMap::new();
    let mut spent = 0.0;

    for booking in bookings {
        let amount = resolve_amount(booking);
        spent += amount;
        let category = booking
            .service_type
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_CATEGORY);
        *by_category.entry(category).or_insert(0.0) += amount;
    }

    let total = (spent * settings.budget_multiplier).max(settings.budget_floor);
    let categories = by_category
        .into_iter()
        .map(|(category, spent)| BudgetCategory {
            category: category.to_string(),
            allocated: spent.max(spent * settings.category_headroom),
            spent,
        })
        .collect();

    Budget {
        total,
        spent,
        remaining: total - spent,
        categories,
    }
}

fn activity_for(booking: &Booking, now: DateTime<Utc>) -> Option<Activity> {
    let service = service_label(booking);
    let vendor = vendor_label(booking);

    let (title, description, icon, color) = match booking.status {
        BookingStatus::QuoteRejected | BookingStatus::Cancelled => return None,
        BookingStatus::Request => (
            "Booking request sent",
            format!("You requested {service} from {vendor}"),
            "send",
            "blue",
        ),
        BookingStatus::QuoteRequested => (
            "Quote requested",
            format!("Waiting for {vendor} to quote {service}"),
            "clock",
            "amber",
        ),
        BookingStatus::QuoteSent => (
            "Quote received",
            format!("{vendor} sent a quote for {service}"),
            "file-text",
            "purple",
        ),
        BookingStatus::QuoteAccepted => (
            "Quote accepted",
            format!("You accepted the quote for {service}"),
            "thumbs-up",
            "indigo",
        ),
        BookingStatus::Confirmed => (
            "Booking confirmed",
            format!("{vendor} confirmed {service}"),
            "check-circle",
            "green",
        ),
        BookingStatus::DepositPaid | BookingStatus::DownpaymentPaid => (
            "Deposit paid",
            format!("Deposit paid for {service}"),
            "credit-card",
            "emerald",
        ),
        BookingStatus::PaidInFull | BookingStatus::FullyPaid => (
            "Payment completed",
            format!("{service} is fully paid"),
            "dollar-sign",
            "emerald",
        ),
        BookingStatus::Completed => (
            "Service completed",
            format!("{vendor} delivered {service}"),
            "star",
            "yellow",
        ),
    };

    Some(Activity {
        booking_id: booking.id.clone(),
        title: title.to_string(),
        description,
        icon,
        color,
        timestamp: booking.created_at,
        time_ago: time_ago(booking.created_at, now),
    })
}

/// Most recent bookings as activity entries, newest first.
///
/// Cancelled and rejected bookings are left out.
#[must_use]
pub fn recent_activities(bookings: &[Booking], limit: usize, now: DateTime<Utc>) -> Vec<Activity> {
    let mut sorted: Vec<&Booking> = bookings.iter().collect();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));

    sorted
        .into_iter()
        .filter_map(|booking| activity_for(booking, now))
        .take(limit)
        .collect()
}

/// Confirmed bookings with a future event date, soonest first.
#[must_use]
pub fn upcoming_events(bookings: &[Booking], now: DateTime<Utc>) -> Vec<UpcomingEvent> {
    let today = now.date_naive();
    let mut events: Vec<(NaiveDate, &Booking)> = bookings
        .iter()
        .filter(|b| is_upcoming(b, today))
        .filter_map(|b| b.event_date.map(|date| (date, b)))
        .collect();
    events.sort_by_key(|(date, _)| *date);

    events
        .into_iter()
        .map(|(date, booking)| UpcomingEvent {
            title: service_label(booking).to_string(),
            date,
            time: booking.event_time.clone(),
            vendor: vendor_label(booking).to_string(),
            location: booking.location.clone(),
            booking_id: booking.id.clone(),
        })
        .collect()
}

/// Builds the whole dashboard.
#[must_use]
pub fn compute_dashboard(
    bookings: &[Booking],
    now: DateTime<Utc>,
    settings: &DashboardSettings,
) -> Dashboard {
    Dashboard {
        stats: compute_stats(bookings, now),
        budget: compute_budget(bookings, settings),
        recent_activities: recent_activities(bookings, settings.activity_limit, now),
        upcoming_events: upcoming_events(bookings, now),
    }
}

fn plural(count: i64, unit: &str) -> String {
    if count == 1 {
        format!("1 {unit} ago")
    } else {
        format!("{count} {unit}s ago")
    }
}

/// Human-readable age of `timestamp` relative to `now`.
///
/// Under a minute (or in the future) is "just now"; then minutes, hours, days,
/// 30-day months and 12-month years.
#[must_use]
pub fn time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = (now - timestamp).num_seconds();
    if seconds < 60 {
        return "just now".to_string();
    }

    let minutes = seconds / 60;
    if minutes < 60 {
        return plural(minutes, "minute");
    }

    let hours = minutes / 60;
    if hours < 24 {
        return plural(hours, "hour");
    }

    let days = hours / 24;
    if days < 30 {
        return plural(days, "day");
    }

    let months = days / 30;
    if months < 12 {
        return plural(months, "month");
    }

    plural(months / 12, "year")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::float_cmp)]
    use super::*;
    use crate::test_utils::*;
    use chrono::Duration;

    fn priced(id: &str, status: BookingStatus, amount: f64) -> Booking {
        let mut booking = sample_booking(id, status);
        booking.final_price = Some(amount.into());
        booking
    }

    #[test]
    fn test_completed_booking_counts_once() {
        let bookings = vec![priced("b1", BookingStatus::Completed, 75000.0)];
        let stats = compute_stats(&bookings, fixed_now());
        assert_eq!(stats.total_bookings, 1);
        assert_eq!(stats.completed_bookings, 1);
        assert_eq!(stats.pending_bookings, 0);
        assert_eq!(stats.confirmed_bookings, 0);
        assert_eq!(stats.total_spent, 75000.0);
    }

    #[test]
    fn test_stats_buckets_and_total_spent() {
        let bookings = vec![
            priced("b1", BookingStatus::Request, 100.0),
            priced("b2", BookingStatus::QuoteSent, 200.0),
            priced("b3", BookingStatus::DepositPaid, 300.0),
            priced("b4", BookingStatus::FullyPaid, 400.0),
            priced("b5", BookingStatus::Cancelled, 500.0),
            priced("b6", BookingStatus::QuoteAccepted, 600.0),
        ];
        let stats = compute_stats(&bookings, fixed_now());
        assert_eq!(stats.total_bookings, 6);
        assert_eq!(stats.pending_bookings, 2);
        assert_eq!(stats.confirmed_bookings, 2);
        assert_eq!(stats.completed_bookings, 0);
        // Cancelled and accepted amounts still count
        assert_eq!(stats.total_spent, 2100.0);
    }

    #[test]
    fn test_stats_are_idempotent() {
        let bookings = sample_bookings();
        let first = compute_stats(&bookings, fixed_now());
        let second = compute_stats(&bookings, fixed_now());
        assert_eq!(first, second);
    }

    #[test]
    fn test_upcoming_requires_future_date_and_confirmed_bucket() {
        let today = fixed_now().date_naive();
        let mut future_confirmed = sample_booking("b1", BookingStatus::Confirmed);
        future_confirmed.event_date = Some(today + Duration::days(30));
        let mut today_confirmed = sample_booking("b2", BookingStatus::PaidInFull);
        today_confirmed.event_date = Some(today);
        let mut future_pending = sample_booking("b3", BookingStatus::QuoteSent);
        future_pending.event_date = Some(today + Duration::days(30));
        let mut past_confirmed = sample_booking("b4", BookingStatus::Confirmed);
        past_confirmed.event_date = Some(today - Duration::days(1));
        let no_date = sample_booking("b5", BookingStatus::Confirmed);

        let bookings = vec![
            future_confirmed,
            today_confirmed,
            future_pending,
            past_confirmed,
            no_date,
        ];
        assert_eq!(compute_stats(&bookings, fixed_now()).upcoming_events, 1);
        let events = upcoming_events(&bookings, fixed_now());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].booking_id, "b1");
    }

    #[test]
    fn test_upcoming_sorted_by_date() {
        let today = fixed_now().date_naive();
        let mut late = sample_booking("late", BookingStatus::Confirmed);
        late.event_date = Some(today + Duration::days(90));
        late.vendor_name = Some("Bloom Florals".to_string());
        late.location = Some("Tagaytay".to_string());
        let mut soon = sample_booking("soon", BookingStatus::DownpaymentPaid);
        soon.event_date = Some(today + Duration::days(3));

        let events = upcoming_events(&[late, soon], fixed_now());
        let ids: Vec<&str> = events.iter().map(|e| e.booking_id.as_str()).collect();
        assert_eq!(ids, vec!["soon", "late"]);
        assert_eq!(events[1].vendor, "Bloom Florals");
        assert_eq!(events[1].location.as_deref(), Some("Tagaytay"));
        assert_eq!(events[1].title, "Photography");
    }

    #[test]
    fn test_budget_floor_and_categories() {
        let mut photo = priced("b1", BookingStatus::Confirmed, 10000.0);
        photo.service_type = Some("Photography".to_string());
        let mut catering = priced("b2", BookingStatus::Completed, 20000.0);
        catering.service_type = Some("Catering".to_string());
        let mut unknown = priced("b3", BookingStatus::Request, 5000.0);
        unknown.service_type = None;

        let budget = compute_budget(&[photo, catering, unknown], &DashboardSettings::default());
        assert_eq!(budget.spent, 35000.0);
        assert_eq!(budget.total, 50000.0);
        assert_eq!(budget.remaining, 15000.0);

        let names: Vec<&str> = budget.categories.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Catering", "Other", "Photography"]);
        assert_eq!(budget.categories[0].spent, 20000.0);
        assert!((budget.categories[0].allocated - 24000.0).abs() < 1e-6);
    }

    #[test]
    fn test_budget_scales_above_floor() {
        let bookings = vec![priced("b1", BookingStatus::Confirmed, 100_000.0)];
        let budget = compute_budget(&bookings, &DashboardSettings::default());
        assert_eq!(budget.total, 150_000.0);
        assert_eq!(budget.remaining, 50_000.0);
    }

    #[test]
    fn test_budget_empty() {
        let budget = compute_budget(&[], &DashboardSettings::default());
        assert_eq!(budget.spent, 0.0);
        assert_eq!(budget.total, 50000.0);
        assert!(budget.categories.is_empty());
    }

    #[test]
    fn test_recent_activities_sorted_filtered_limited() {
        let now = fixed_now();
        let mut bookings = Vec::new();
        for i in 0..12 {
            let mut booking = sample_booking(&format!("b{i}"), BookingStatus::Confirmed);
            booking.created_at = now - Duration::hours(i);
            bookings.push(booking);
        }
        let mut cancelled = sample_booking("cancelled", BookingStatus::Cancelled);
        cancelled.created_at = now;
        bookings.push(cancelled);
        let mut rejected = sample_booking("rejected", BookingStatus::QuoteRejected);
        rejected.created_at = now;
        bookings.push(rejected);

        let activities = recent_activities(&bookings, 10, now);
        assert_eq!(activities.len(), 10);
        assert_eq!(activities[0].booking_id, "b0");
        assert_eq!(activities[9].booking_id, "b9");
        assert!(activities.iter().all(|a| a.title == "Booking confirmed"));
        assert_eq!(activities[1].time_ago, "1 hour ago");
    }

    #[test]
    fn test_activity_text_uses_vendor_and_service() {
        let mut booking = sample_booking("b1", BookingStatus::QuoteSent);
        booking.vendor_name = Some("Lens & Light".to_string());
        booking.service_name = Some("Same-day edit".to_string());
        let activities = recent_activities(&[booking], 10, fixed_now());
        assert_eq!(activities[0].title, "Quote received");
        assert_eq!(
            activities[0].description,
            "Lens & Light sent a quote for Same-day edit"
        );
        assert_eq!(activities[0].icon, "file-text");
    }

    #[test]
    fn test_time_ago_boundaries() {
        let now = fixed_now();
        let cases = [
            (Duration::seconds(0), "just now"),
            (Duration::seconds(59), "just now"),
            (Duration::seconds(60), "1 minute ago"),
            (Duration::minutes(59), "59 minutes ago"),
            (Duration::minutes(60), "1 hour ago"),
            (Duration::hours(23), "23 hours ago"),
            (Duration::hours(24), "1 day ago"),
            (Duration::days(29), "29 days ago"),
            (Duration::days(30), "1 month ago"),
            (Duration::days(359), "11 months ago"),
            (Duration::days(360), "1 year ago"),
            (Duration::days(800), "2 years ago"),
        ];
        for (age, expected) in cases {
            assert_eq!(time_ago(now - age, now), expected, "{age:?}");
        }
        assert_eq!(time_ago(now + Duration::hours(2), now), "just now");
    }

    #[test]
    fn test_compute_dashboard_combines_views() {
        let bookings = sample_bookings();
        let dashboard = compute_dashboard(&bookings, fixed_now(), &DashboardSettings::default());
        assert_eq!(dashboard.stats.total_bookings, bookings.len());
        assert_eq!(dashboard.stats.total_spent, dashboard.budget.spent);
        assert_eq!(
            dashboard.stats.upcoming_events,
            dashboard.upcoming_events.len()
        );

        let json = serde_json::to_value(&dashboard).unwrap();
        assert!(json["stats"]["totalBookings"].is_number());
        assert!(json["recentActivities"].is_array());
        assert!(json["upcomingEvents"].is_array());
    }
}
