//! In-memory backends and fixtures shared by the integration tests.
#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::SqlitePool;
use staydesk_app::state::BookingSystem;
use staydesk_core::catalog::{Hotel, Room, RoomStatus};
use staydesk_core::draft::ContactDetails;
use staydesk_provider::{
    BookingProvider, BookingReceipt, BookingRequest, CatalogProvider, ProviderError,
};

pub const PASSWORD: &str = "demo123";

// ---------------------------------------------------------------------------
// Catalog backend
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeCatalog {
    pub hotels: Mutex<Vec<Hotel>>,
    pub rooms: Mutex<Vec<Room>>,
    pub fail_rooms: AtomicBool,
    pub time_out: AtomicBool,
}

impl FakeCatalog {
    pub fn seeded() -> Self {
        Self {
            hotels: Mutex::new(hotels()),
            rooms: Mutex::new(rooms()),
            ..Self::default()
        }
    }
}

#[async_trait]
impl CatalogProvider for FakeCatalog {
    async fn fetch_hotels(&self) -> Result<Vec<Hotel>, ProviderError> {
        if self.time_out.load(Ordering::SeqCst) {
            return Err(ProviderError::Timeout);
        }
        Ok(self.hotels.lock().unwrap().clone())
    }

    async fn fetch_rooms(&self) -> Result<Vec<Room>, ProviderError> {
        if self.time_out.load(Ordering::SeqCst) {
            return Err(ProviderError::Timeout);
        }
        if self.fail_rooms.load(Ordering::SeqCst) {
            return Err(ProviderError::Api {
                status: 503,
                message: "rooms unavailable".into(),
            });
        }
        Ok(self.rooms.lock().unwrap().clone())
    }
}

// ---------------------------------------------------------------------------
// Booking backend
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeBookings {
    pub requests: Mutex<Vec<BookingRequest>>,
    pub reject_with: Mutex<Option<String>>,
    pub next_id: Mutex<Option<String>>,
}

impl FakeBookings {
    pub fn reject(&self, message: &str) {
        *self.reject_with.lock().unwrap() = Some(message.to_string());
    }

    pub fn accept(&self) {
        *self.reject_with.lock().unwrap() = None;
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl BookingProvider for FakeBookings {
    async fn create_booking(
        &self,
        request: &BookingRequest,
    ) -> Result<BookingReceipt, ProviderError> {
        self.requests.lock().unwrap().push(request.clone());
        if let Some(message) = self.reject_with.lock().unwrap().clone() {
            return Err(ProviderError::Api {
                status: 409,
                message,
            });
        }
        Ok(BookingReceipt {
            id: self.next_id.lock().unwrap().take(),
        })
    }
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub fn hotels() -> Vec<Hotel> {
    vec![
        Hotel {
            id: 1,
            name: "Burj Al Arab".into(),
            location: "Dubai, UAE".into(),
        },
        Hotel {
            id: 2,
            name: "The Ritz Paris".into(),
            location: "Paris, France".into(),
        },
    ]
}

pub fn rooms() -> Vec<Room> {
    vec![
        room(10, 1, "deluxe suite", 200, RoomStatus::Available),
        room(11, 1, "royal suite", 150, RoomStatus::Unavailable),
        room(20, 2, "superior", 300, RoomStatus::Available),
    ]
}

pub fn room(id: i64, hotel_id: i64, room_type: &str, price: i64, status: RoomStatus) -> Room {
    Room {
        id,
        hotel_id,
        room_type: room_type.into(),
        price,
        status,
    }
}

pub fn date(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

pub fn contact() -> ContactDetails {
    ContactDetails {
        name: "Demo User".into(),
        phone: "+1 555 0100".into(),
        email: "demo@example.com".into(),
        notes: "Late arrival".into(),
    }
}

pub struct Harness {
    pub system: BookingSystem,
    pub catalog: Arc<FakeCatalog>,
    pub bookings: Arc<FakeBookings>,
}

/// A booking system over `pool` with a refreshed catalog and nobody signed in.
pub async fn harness(pool: SqlitePool) -> Harness {
    let catalog = Arc::new(FakeCatalog::seeded());
    let bookings = Arc::new(FakeBookings::default());
    let mut system = BookingSystem::new(pool, catalog.clone(), bookings.clone(), 6);
    system.catalog.refresh().await.unwrap();
    Harness {
        system,
        catalog,
        bookings,
    }
}

/// Same as [`harness`] with `demo@example.com` signed up and signed in.
pub async fn signed_in(pool: SqlitePool) -> Harness {
    let mut h = harness(pool).await;
    h.system
        .session
        .sign_up("demo@example.com", PASSWORD, "Demo User")
        .await
        .unwrap();
    h
}

/// Walk the wizard to the review step for room 10 from check-in to check-out.
pub fn fill_wizard(system: &mut BookingSystem, check_in: &str, check_out: &str) {
    system.start_booking();
    let catalog = system.catalog.snapshot();
    system.wizard.select_hotel(catalog, 1).unwrap();
    system.wizard.advance().unwrap();
    system.wizard.select_room(catalog, 10).unwrap();
    system
        .wizard
        .set_dates(Some(date(check_in)), Some(date(check_out)));
    system.wizard.advance().unwrap();
    system.wizard.set_contact(contact());
    system.wizard.advance().unwrap();
}
