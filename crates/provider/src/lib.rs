//! Client side of the hotel backend.
//!
//! Provides the provider traits the booking core depends on, the
//! [`reqwest`]-based [`api::BackendApi`] implementing them, and the bounded
//! retry policy used for idempotent catalog reads.

use async_trait::async_trait;
use staydesk_core::catalog::{Hotel, Room};

pub mod api;
pub mod retry;

pub use api::{BackendApi, BookingReceipt, BookingRequest, ProviderError};
pub use retry::RetryPolicy;

/// Source of hotel and room inventory.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn fetch_hotels(&self) -> Result<Vec<Hotel>, ProviderError>;

    async fn fetch_rooms(&self) -> Result<Vec<Room>, ProviderError>;
}

/// Remote system that accepts booking requests.
#[async_trait]
pub trait BookingProvider: Send + Sync {
    async fn create_booking(&self, request: &BookingRequest)
        -> Result<BookingReceipt, ProviderError>;
}
