use std::sync::Arc;

use chrono::NaiveDate;
use staydesk_core::booking::{Booking, BookingPartition, BookingStats};
use staydesk_core::error::CoreError;
use staydesk_db::DbPool;
use staydesk_provider::{BackendApi, BookingProvider, CatalogProvider};

use crate::catalog::CatalogCache;
use crate::config::AppConfig;
use crate::error::AppResult;
use crate::ledger::BookingLedger;
use crate::session::SessionStore;
use crate::wizard::WizardController;

/// The booking core: one session, one catalog snapshot, one wizard and the
/// ledger, owned together and passed explicitly.
pub struct BookingSystem {
    /// Database connection pool shared by the session and the ledger.
    pub pool: DbPool,
    pub session: SessionStore,
    pub catalog: CatalogCache,
    pub wizard: WizardController,
    pub ledger: BookingLedger,
}

impl BookingSystem {
    pub fn new(
        pool: DbPool,
        catalog_provider: Arc<dyn CatalogProvider>,
        booking_provider: Arc<dyn BookingProvider>,
        password_min_length: usize,
    ) -> Self {
        Self {
            session: SessionStore::new(pool.clone(), password_min_length),
            catalog: CatalogCache::new(catalog_provider),
            wizard: WizardController::new(booking_provider),
            ledger: BookingLedger::new(pool.clone()),
            pool,
        }
    }

    /// Open the store, apply migrations and point both providers at the
    /// configured backend.
    pub async fn connect(config: &AppConfig) -> AppResult<Self> {
        let pool = staydesk_db::create_pool(&config.database_url).await?;
        tracing::info!("Database connection pool created");

        staydesk_db::health_check(&pool).await?;
        staydesk_db::run_migrations(&pool).await?;
        tracing::info!("Database migrations applied");

        let api = Arc::new(BackendApi::new(
            &config.api_base,
            config.request_timeout(),
            config.retry_policy(),
        )?);
        tracing::info!(api_base = %api.api_base(), "Backend client ready");

        Ok(Self::new(
            pool,
            api.clone(),
            api,
            config.password_min_length,
        ))
    }

    /// Reset the wizard for a new booking by the current user.
    pub fn start_booking(&mut self) {
        self.wizard.start(&self.session);
    }

    /// Submit the reviewed draft, then refresh the catalog so room
    /// availability reflects the new booking.
    pub async fn submit_booking(&mut self) -> AppResult<Booking> {
        let booking = self
            .wizard
            .submit(&self.session, self.catalog.snapshot(), &self.ledger)
            .await?;

        if let Err(e) = self.catalog.refresh().await {
            tracing::warn!(booking_id = %booking.id, error = %e, "Catalog refresh after booking failed");
        }
        Ok(booking)
    }

    /// The signed-in user's bookings as of `today`.
    pub async fn my_bookings(&self, today: NaiveDate) -> AppResult<BookingPartition> {
        let user = self.session.require_user()?;
        self.ledger.list_for(user.id, today).await
    }

    pub async fn my_stats(&self) -> AppResult<BookingStats> {
        let user = self.session.require_user()?;
        self.ledger.stats_for(user.id).await
    }

    /// Cancel one of the signed-in user's bookings.
    ///
    /// Bookings of other users are reported as not found.
    pub async fn cancel_booking(&self, booking_id: &str) -> AppResult<()> {
        let user = self.session.require_user()?;
        match self.ledger.find(booking_id).await? {
            Some(booking) if booking.user_id == user.id => self.ledger.cancel(booking_id).await,
            _ => Err(CoreError::NotFound {
                entity: "booking",
                id: booking_id.to_string(),
            }
            .into()),
        }
    }

    /// Sign out and clear any draft in progress.
    pub fn sign_out(&mut self) {
        self.session.sign_out();
        self.wizard.start(&self.session);
    }

    /// Delete the signed-in account and drop the draft pre-filled from it.
    pub async fn delete_account(&mut self, confirmation: &str) -> AppResult<()> {
        self.session.delete_account(confirmation).await?;
        self.wizard.start(&self.session);
        Ok(())
    }
}
