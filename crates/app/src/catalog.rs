//! Catalog Cache: the last successfully fetched hotels and rooms.

use std::sync::Arc;

use chrono::Utc;
use staydesk_core::catalog::{Catalog, Hotel, Room};
use staydesk_core::types::{DbId, Timestamp};
use staydesk_provider::CatalogProvider;

use crate::error::{fetch_error, AppResult};

pub struct CatalogCache {
    provider: Arc<dyn CatalogProvider>,
    snapshot: Catalog,
    refreshed_at: Option<Timestamp>,
}

impl CatalogCache {
    /// An empty cache; nothing is fetched until [`CatalogCache::refresh`].
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            snapshot: Catalog::default(),
            refreshed_at: None,
        }
    }

    /// Fetch hotels and rooms concurrently and replace both together.
    ///
    /// If either request fails the previous snapshot is kept as is.
    pub async fn refresh(&mut self) -> AppResult<()> {
        let (hotels, rooms) = futures::try_join!(
            self.provider.fetch_hotels(),
            self.provider.fetch_rooms()
        )
        .map_err(|e| {
            tracing::warn!(error = %e, "Catalog refresh failed");
            fetch_error(e)
        })?;

        tracing::info!(hotels = hotels.len(), rooms = rooms.len(), "Catalog refreshed");
        self.snapshot = Catalog::new(hotels, rooms);
        self.refreshed_at = Some(Utc::now());
        Ok(())
    }

    pub fn snapshot(&self) -> &Catalog {
        &self.snapshot
    }

    /// When the current snapshot was fetched, `None` before the first refresh.
    pub fn refreshed_at(&self) -> Option<Timestamp> {
        self.refreshed_at
    }

    pub fn hotels(&self) -> &[Hotel] {
        self.snapshot.hotels()
    }

    pub fn hotel(&self, id: DbId) -> Option<&Hotel> {
        self.snapshot.hotel(id)
    }

    pub fn room(&self, id: DbId) -> Option<&Room> {
        self.snapshot.room(id)
    }

    pub fn available_rooms(&self, hotel_id: DbId) -> impl Iterator<Item = &Room> {
        self.snapshot.available_rooms(hotel_id)
    }

    /// Lowest nightly price among the hotel's available rooms.
    pub fn cheapest_available(&self, hotel_id: DbId) -> Option<i64> {
        self.snapshot.cheapest_available(hotel_id)
    }
}
