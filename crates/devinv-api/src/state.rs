//! # Application State
//!
//! Shared state for the Axum application, passed to all route handlers
//! via the `State` extractor.
//!
//! The lifecycle engine is the only owner of device data. It is backed by
//! Postgres when `DATABASE_URL` is set and by [`MemoryDeviceStore`]
//! otherwise.

use std::sync::Arc;

use devinv_core::DeviceStore;
use devinv_state::{DeviceLifecycle, MemoryDeviceStore};
use sqlx::PgPool;

use crate::middleware::metrics::ApiMetrics;

// -- Configuration ------------------------------------------------------------

/// Log output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per event.
    Json,
}

/// Application configuration.
///
/// `Debug` never prints the database URL, which commonly embeds a password.
#[derive(Clone)]
pub struct AppConfig {
    /// Port to bind the HTTP server to.
    pub port: u16,
    /// Postgres connection string. `None` selects the in-memory store.
    pub database_url: Option<String>,
    /// Upper bound on pooled Postgres connections.
    pub database_max_connections: u32,
    pub log_format: LogFormat,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("port", &self.port)
            .field(
                "database_url",
                &self.database_url.as_ref().map(|_| "[REDACTED]"),
            )
            .field("database_max_connections", &self.database_max_connections)
            .field("log_format", &self.log_format)
            .finish()
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 8080,
            database_url: None,
            database_max_connections: 10,
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// Build configuration from process environment variables.
    ///
    /// | Variable                   | Default |
    /// |----------------------------|---------|
    /// | `PORT`                     | 8080    |
    /// | `DATABASE_URL`             | unset   |
    /// | `DATABASE_MAX_CONNECTIONS` | 10      |
    /// | `LOG_FORMAT`               | text    |
    ///
    /// Unparseable numeric values fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();

        let port = lookup("PORT")
            .and_then(|p| p.trim().parse().ok())
            .unwrap_or(defaults.port);

        let database_url = lookup("DATABASE_URL").filter(|url| !url.trim().is_empty());

        let database_max_connections = lookup("DATABASE_MAX_CONNECTIONS")
            .and_then(|n| n.trim().parse().ok())
            .filter(|n| *n > 0)
            .unwrap_or(defaults.database_max_connections);

        let log_format = match lookup("LOG_FORMAT") {
            Some(f) if f.trim().eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Text,
        };

        Self {
            port,
            database_url,
            database_max_connections,
            log_format,
        }
    }
}

// -- Application State --------------------------------------------------------

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub lifecycle: DeviceLifecycle,
    /// Present when running against Postgres; used by the readiness probe.
    pub db_pool: Option<PgPool>,
    pub metrics: ApiMetrics,
}

impl AppState {
    /// In-memory state with no database.
    pub fn new() -> prometheus::Result<Self> {
        Self::with_store(Arc::new(MemoryDeviceStore::new()), None)
    }

    /// State over an explicit store gateway.
    ///
    /// Fails only if the metrics registry rejects a collector.
    pub fn with_store(
        store: Arc<dyn DeviceStore>,
        db_pool: Option<PgPool>,
    ) -> prometheus::Result<Self> {
        Ok(Self {
            lifecycle: DeviceLifecycle::new(store),
            db_pool,
            metrics: ApiMetrics::new()?,
        })
    }
}
