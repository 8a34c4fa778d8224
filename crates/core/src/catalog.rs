//! Hotel and room inventory snapshot.
//!
//! The catalog is read-only from the core's point of view: it is replaced
//! wholesale by a refresh and only ever queried afterwards.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Entities
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hotel {
    pub id: DbId,
    pub name: String,
    #[serde(default)]
    pub location: String,
}

/// Whether a room can currently be booked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomStatus {
    Available,
    Unavailable,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: DbId,
    pub hotel_id: DbId,
    #[serde(rename = "type")]
    pub room_type: String,
    /// Nightly price in whole currency units.
    pub price: i64,
    pub status: RoomStatus,
}

impl Room {
    pub fn is_available(&self) -> bool {
        self.status == RoomStatus::Available
    }
}

// ---------------------------------------------------------------------------
// Snapshot
// ---------------------------------------------------------------------------

/// One consistent view of hotels and rooms.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Catalog {
    hotels: Vec<Hotel>,
    rooms: Vec<Room>,
}

impl Catalog {
    pub fn new(hotels: Vec<Hotel>, rooms: Vec<Room>) -> Self {
        Self { hotels, rooms }
    }

    pub fn hotels(&self) -> &[Hotel] {
        &self.hotels
    }

    pub fn rooms(&self) -> &[Room] {
        &self.rooms
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty() && self.rooms.is_empty()
    }

    pub fn hotel(&self, id: DbId) -> Option<&Hotel> {
        self.hotels.iter().find(|h| h.id == id)
    }

    pub fn room(&self, id: DbId) -> Option<&Room> {
        self.rooms.iter().find(|r| r.id == id)
    }

    /// Rooms of `hotel_id` that can be booked right now.
    pub fn available_rooms(&self, hotel_id: DbId) -> impl Iterator<Item = &Room> {
        self.rooms
            .iter()
            .filter(move |r| r.hotel_id == hotel_id && r.is_available())
    }

    /// Lowest nightly price among the available rooms of a hotel.
    ///
    /// Returns `None` when the hotel has no available room (or does not exist).
    pub fn cheapest_available(&self, hotel_id: DbId) -> Option<i64> {
        self.available_rooms(hotel_id).map(|r| r.price).min()
    }

    /// Look up a room that may be booked under `hotel_id`.
    ///
    /// The room must exist, belong to that hotel and be available.
    pub fn bookable_room(&self, hotel_id: DbId, room_id: DbId) -> Result<&Room, CoreError> {
        let room = self
            .room(room_id)
            .ok_or_else(|| CoreError::Validation(format!("Room {room_id} does not exist")))?;
        if room.hotel_id != hotel_id {
            return Err(CoreError::Validation(format!(
                "Room {room_id} does not belong to hotel {hotel_id}"
            )));
        }
        if !room.is_available() {
            return Err(CoreError::Validation(format!(
                "Room {room_id} is not available"
            )));
        }
        Ok(room)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
