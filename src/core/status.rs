//! Booking status definitions and the allowed-transition graph.
//!
//! Every status check in the crate goes through [`BookingStatus::bucket`] and
//! [`can_transition`]; there are no ad-hoc status lists elsewhere.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Lifecycle state of a booking.
///
/// `DepositPaid`/`DownpaymentPaid` and `PaidInFull`/`FullyPaid` are synonyms that
/// both exist in stored data; they behave identically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Initial state, the couple asked for the service
    Request,
    /// Couple asked the vendor for a quote
    QuoteRequested,
    /// Vendor sent an itemized quote
    QuoteSent,
    /// Couple accepted the quote
    QuoteAccepted,
    /// Couple rejected the quote (terminal)
    QuoteRejected,
    /// Vendor confirmed the engagement
    Confirmed,
    /// Deposit received
    DepositPaid,
    /// Downpayment received
    DownpaymentPaid,
    /// Paid in full
    PaidInFull,
    /// Fully paid
    FullyPaid,
    /// Service delivered (terminal)
    Completed,
    /// Cancelled by either side (terminal)
    Cancelled,
}

/// Disjoint status groupings used for dashboard counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StatusBucket {
    /// Waiting on a quote or a decision
    Pending,
    /// Confirmed and possibly partially or fully paid
    Confirmed,
    /// Delivered
    Completed,
    /// Accepted-but-unconfirmed, rejected and cancelled bookings
    Other,
}

impl BookingStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 12] = [
        Self::Request,
        Self::QuoteRequested,
        Self::QuoteSent,
        Self::QuoteAccepted,
        Self::QuoteRejected,
        Self::Confirmed,
        Self::DepositPaid,
        Self::DownpaymentPaid,
        Self::PaidInFull,
        Self::FullyPaid,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Statuses reachable from `self` through the adjacency table.
    ///
    /// Cancellation is handled separately in [`can_transition`].
    #[must_use]
    pub const fn successors(self) -> &'static [Self] {
        match self {
            Self::Request => &[Self::QuoteRequested],
            Self::QuoteRequested => &[Self::QuoteSent],
            Self::QuoteSent => &[Self::QuoteAccepted, Self::QuoteRejected],
            Self::QuoteAccepted => &[Self::Confirmed],
            Self::Confirmed => &[Self::DepositPaid, Self::DownpaymentPaid],
            Self::DepositPaid | Self::DownpaymentPaid => &[Self::PaidInFull, Self::FullyPaid],
            Self::PaidInFull | Self::FullyPaid => &[Self::Completed],
            Self::QuoteRejected | Self::Completed | Self::Cancelled => &[],
        }
    }

    /// Whether no further transition is permitted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::QuoteRejected | Self::Completed | Self::Cancelled)
    }

    /// Dashboard bucket for this status.
    #[must_use]
    pub const fn bucket(self) -> StatusBucket {
        match self {
            Self::Request | Self::QuoteRequested | Self::QuoteSent => StatusBucket::Pending,
            Self::Confirmed
            | Self::DepositPaid
            | Self::DownpaymentPaid
            | Self::PaidInFull
            | Self::FullyPaid => StatusBucket::Confirmed,
            Self::Completed => StatusBucket::Completed,
            Self::QuoteAccepted | Self::QuoteRejected | Self::Cancelled => StatusBucket::Other,
        }
    }

    /// Whether entering this status carries a quote total.
    #[must_use]
    pub const fn is_quote_bearing(self) -> bool {
        matches!(self, Self::QuoteSent | Self::QuoteAccepted)
    }

    /// Storage label.
    #[must_use]
    pub const fn as_label(self) -> &'static str {
        match self {
            Self::Request => "request",
            Self::QuoteRequested => "quote_requested",
            Self::QuoteSent => "quote_sent",
            Self::QuoteAccepted => "quote_accepted",
            Self::QuoteRejected => "quote_rejected",
            Self::Confirmed => "confirmed",
            Self::DepositPaid => "deposit_paid",
            Self::DownpaymentPaid => "downpayment_paid",
            Self::PaidInFull => "paid_in_full",
            Self::FullyPaid => "fully_paid",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a storage label, case-insensitive. `pending` is an old name for `request`.
    #[must_use]
    pub fn from_label(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "request" | "pending" => Some(Self::Request),
            "quote_requested" => Some(Self::QuoteRequested),
            "quote_sent" => Some(Self::QuoteSent),
            "quote_accepted" => Some(Self::QuoteAccepted),
            "quote_rejected" => Some(Self::QuoteRejected),
            "confirmed" => Some(Self::Confirmed),
            "deposit_paid" => Some(Self::DepositPaid),
            "downpayment_paid" => Some(Self::DownpaymentPaid),
            "paid_in_full" => Some(Self::PaidInFull),
            "fully_paid" => Some(Self::FullyPaid),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_label())
    }
}

/// True iff `next` is in the adjacency table for `current`, or `next` is
/// `cancelled` and `current` is not terminal.
#[must_use]
pub fn can_transition(current: BookingStatus, next: BookingStatus) -> bool {
    if next == BookingStatus::Cancelled {
        return !current.is_terminal();
    }
    current.successors().contains(&next)
}
