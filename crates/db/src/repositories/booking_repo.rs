//! Repository for the `bookings` table.

use sqlx::SqlitePool;
use staydesk_core::booking::{Booking, BookingStatus};
use staydesk_core::types::UserId;

use crate::models::booking::BookingRow;

const COLUMNS: &str = "id, backend_id, user_id, hotel_id, room_id, check_in, check_out, name, \
                       phone, email, notes, status, created_at, total, nights";

/// Provides per-row operations for bookings.
pub struct BookingRepo;

impl BookingRepo {
    /// Insert a finalized booking as given, returning the stored row.
    pub async fn create(pool: &SqlitePool, booking: &Booking) -> Result<Booking, sqlx::Error> {
        let query = format!(
            "INSERT INTO bookings (id, backend_id, user_id, hotel_id, room_id, check_in,
                                   check_out, name, phone, email, notes, status, created_at,
                                   total, nights)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(&booking.id)
            .bind(&booking.backend_id)
            .bind(booking.user_id.to_string())
            .bind(booking.hotel_id)
            .bind(booking.room_id)
            .bind(booking.check_in)
            .bind(booking.check_out)
            .bind(&booking.name)
            .bind(&booking.phone)
            .bind(&booking.email)
            .bind(&booking.notes)
            .bind(booking.status.as_str())
            .bind(booking.created_at)
            .bind(booking.total)
            .bind(booking.nights)
            .fetch_one(pool)
            .await?
            .try_into()
    }

    pub async fn find_by_id(pool: &SqlitePool, id: &str) -> Result<Option<Booking>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM bookings WHERE id = ?1");
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?
            .map(Booking::try_from)
            .transpose()
    }

    /// All bookings of a user in the order they were made.
    pub async fn list_for_user(
        pool: &SqlitePool,
        user_id: UserId,
    ) -> Result<Vec<Booking>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM bookings WHERE user_id = ?1 ORDER BY created_at ASC, rowid ASC"
        );
        sqlx::query_as::<_, BookingRow>(&query)
            .bind(user_id.to_string())
            .fetch_all(pool)
            .await?
            .into_iter()
            .map(Booking::try_from)
            .collect()
    }

    /// Set the status of one booking. Returns `true` if the booking exists.
    ///
    /// Writing the status a booking already has still counts as a match.
    pub async fn update_status(
        pool: &SqlitePool,
        id: &str,
        status: BookingStatus,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("UPDATE bookings SET status = ?2 WHERE id = ?1")
            .bind(id)
            .bind(status.as_str())
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
