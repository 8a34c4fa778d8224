use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use staydesk_app::config::AppConfig;
use staydesk_app::state::BookingSystem;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // --- Tracing ---
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "staydesk_app=debug,staydesk_provider=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // --- Configuration ---
    let config = AppConfig::from_env().context("Invalid configuration")?;
    tracing::info!(api_base = %config.api_base, "Loaded configuration");

    // --- Booking core ---
    let mut system = BookingSystem::connect(&config)
        .await
        .context("Failed to start booking core")?;

    system
        .catalog
        .refresh()
        .await
        .context("Failed to load hotels and rooms")?;

    for hotel in system.catalog.hotels() {
        match system.catalog.cheapest_available(hotel.id) {
            Some(price) => tracing::info!(
                hotel_id = hotel.id,
                name = %hotel.name,
                location = %hotel.location,
                from_price = price,
                "Hotel"
            ),
            None => tracing::info!(
                hotel_id = hotel.id,
                name = %hotel.name,
                location = %hotel.location,
                "Hotel (no rooms available)"
            ),
        }
    }

    Ok(())
}
