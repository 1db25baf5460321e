//! # devinv-api — Binary Entry Point
//!
//! Starts the Axum HTTP server for the device inventory.
//! Binds to a configurable port (default 8080).

use std::sync::Arc;

use devinv_api::db::{self, PgDeviceStore};
use devinv_api::middleware::tracing_layer;
use devinv_api::state::{AppConfig, AppState};
use devinv_core::DeviceStore;
use devinv_state::MemoryDeviceStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env();
    tracing_layer::init_subscriber(config.log_format);
    tracing::debug!(?config, "Loaded configuration");

    // Database pool is optional; absent means in-memory only.
    let db_pool = db::init_pool(&config).await.map_err(|e| {
        tracing::error!("Database initialization failed: {e}");
        e
    })?;

    let store: Arc<dyn DeviceStore> = match &db_pool {
        Some(pool) => Arc::new(PgDeviceStore::new(pool.clone())),
        None => Arc::new(MemoryDeviceStore::new()),
    };

    let state = AppState::with_store(store, db_pool)?;
    let app = devinv_api::app(state);

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Device inventory API listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        tracing::error!("Failed to bind {addr}: {e}");
        e
    })?;
    axum::serve(listener, app).await?;

    Ok(())
}
