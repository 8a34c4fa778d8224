//! Booking Ledger: confirmed and cancelled bookings per user.

use chrono::NaiveDate;
use staydesk_core::booking::{
    booking_stats, partition_bookings, Booking, BookingPartition, BookingStats, BookingStatus,
};
use staydesk_core::error::CoreError;
use staydesk_core::types::UserId;
use staydesk_db::repositories::BookingRepo;
use staydesk_db::DbPool;

use crate::error::AppResult;

pub struct BookingLedger {
    pool: DbPool,
}

impl BookingLedger {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// Append a booking. Existing bookings are never rewritten.
    pub async fn add(&self, booking: &Booking) -> AppResult<Booking> {
        let stored = BookingRepo::create(&self.pool, booking).await?;
        tracing::debug!(booking_id = %stored.id, user_id = %stored.user_id, "Booking recorded");
        Ok(stored)
    }

    pub async fn find(&self, booking_id: &str) -> AppResult<Option<Booking>> {
        Ok(BookingRepo::find_by_id(&self.pool, booking_id).await?)
    }

    /// Mark a booking cancelled. Cancelling twice is not an error.
    pub async fn cancel(&self, booking_id: &str) -> AppResult<()> {
        if !BookingRepo::update_status(&self.pool, booking_id, BookingStatus::Cancelled).await? {
            return Err(CoreError::NotFound {
                entity: "booking",
                id: booking_id.to_string(),
            }
            .into());
        }
        tracing::info!(booking_id, "Booking cancelled");
        Ok(())
    }

    /// The user's bookings split into upcoming and history as of `today`.
    pub async fn list_for(&self, user_id: UserId, today: NaiveDate) -> AppResult<BookingPartition> {
        let bookings = BookingRepo::list_for_user(&self.pool, user_id).await?;
        Ok(partition_bookings(bookings, today))
    }

    pub async fn stats_for(&self, user_id: UserId) -> AppResult<BookingStats> {
        let bookings = BookingRepo::list_for_user(&self.pool, user_id).await?;
        Ok(booking_stats(&bookings))
    }
}
