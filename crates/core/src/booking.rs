//! Finalized bookings and the dashboard views over them.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{BookingId, DbId, Timestamp, UserId};

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Lifecycle of a booking. Only cancellation changes it after creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    Confirmed,
    Pending,
    Cancelled,
}

impl BookingStatus {
    /// Parse a status string from the database.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "confirmed" => Ok(Self::Confirmed),
            "pending" => Ok(Self::Pending),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(CoreError::Validation(format!(
                "Invalid booking status '{s}'. Must be one of: confirmed, pending, cancelled"
            ))),
        }
    }

    /// Convert to a database-compatible string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "confirmed",
            Self::Pending => "pending",
            Self::Cancelled => "cancelled",
        }
    }
}

// ---------------------------------------------------------------------------
// Booking
// ---------------------------------------------------------------------------

/// A confirmed (or later cancelled) stay.
///
/// `total` and `nights` are frozen at confirmation time and never
/// recomputed from the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: BookingId,
    /// Id the hotel backend assigned, when it sent one. Not unique locally.
    #[serde(default)]
    pub backend_id: Option<String>,
    pub user_id: UserId,
    pub hotel_id: DbId,
    pub room_id: DbId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
    pub status: BookingStatus,
    pub created_at: Timestamp,
    pub total: i64,
    pub nights: i64,
}

impl Booking {
    /// Still ahead of the guest: checks in today or later and not cancelled.
    pub fn is_upcoming(&self, today: NaiveDate) -> bool {
        self.check_in >= today && self.status != BookingStatus::Cancelled
    }
}

/// A user's bookings split for the dashboard tabs.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BookingPartition {
    pub upcoming: Vec<Booking>,
    pub history: Vec<Booking>,
}

/// Split bookings into upcoming and history relative to `today`.
///
/// History holds everything that is not upcoming: past check-ins and any
/// cancelled booking. Input order is preserved within each side.
pub fn partition_bookings(
    bookings: impl IntoIterator<Item = Booking>,
    today: NaiveDate,
) -> BookingPartition {
    let (upcoming, history): (Vec<Booking>, Vec<Booking>) =
        bookings.into_iter().partition(|b| b.is_upcoming(today));
    BookingPartition { upcoming, history }
}

/// Profile statistics shown on the dashboard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingStats {
    pub total_bookings: usize,
    pub total_spent: i64,
}

/// Count bookings and sum their totals. Cancelled bookings are included.
pub fn booking_stats<'a>(bookings: impl IntoIterator<Item = &'a Booking>) -> BookingStats {
    bookings
        .into_iter()
        .fold(BookingStats::default(), |acc, b| BookingStats {
            total_bookings: acc.total_bookings + 1,
            total_spent: acc.total_spent.saturating_add(b.total),
        })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
