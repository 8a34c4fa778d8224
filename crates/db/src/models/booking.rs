//! Booking row model.

use chrono::NaiveDate;
use sqlx::FromRow;
use staydesk_core::booking::{Booking, BookingStatus};
use staydesk_core::types::{DbId, Timestamp};
use uuid::Uuid;

use super::decode_error;

/// Full row from the `bookings` table.
#[derive(Debug, Clone, FromRow)]
pub struct BookingRow {
    pub id: String,
    pub backend_id: Option<String>,
    pub user_id: String,
    pub hotel_id: DbId,
    pub room_id: DbId,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub name: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
    pub status: String,
    pub created_at: Timestamp,
    pub total: i64,
    pub nights: i64,
}

impl TryFrom<BookingRow> for Booking {
    type Error = sqlx::Error;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Booking {
            id: row.id,
            backend_id: row.backend_id,
            user_id: Uuid::parse_str(&row.user_id).map_err(decode_error)?,
            hotel_id: row.hotel_id,
            room_id: row.room_id,
            check_in: row.check_in,
            check_out: row.check_out,
            name: row.name,
            phone: row.phone,
            email: row.email,
            notes: row.notes,
            status: BookingStatus::from_str_db(&row.status).map_err(decode_error)?,
            created_at: row.created_at,
            total: row.total,
            nights: row.nights,
        })
    }
}
