/// Backend-assigned numeric ids (hotels, rooms).
pub type DbId = i64;

/// Locally generated user ids.
pub type UserId = uuid::Uuid;

/// Booking ids are whatever the booking backend hands back, as a string.
pub type BookingId = String;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
