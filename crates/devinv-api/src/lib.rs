//! # devinv-api — Axum API Service for the Device Inventory
//!
//! HTTP surface over the device lifecycle engine. Handlers translate
//! requests into engine calls and map engine errors to structured JSON
//! responses; no lifecycle rule lives in this crate.
//!
//! ## API Surface
//!
//! | Route                         | Module                      |
//! |-------------------------------|-----------------------------|
//! | `/devices`, `/devices/{id}`   | [`routes::devices`]         |
//! | `/devices/brand/{brand}`      | [`routes::devices`]         |
//! | `/devices/state/{state}`      | [`routes::devices`]         |
//! | `/metrics`                    | [`middleware::metrics`]     |
//! | `/openapi.json`               | [`openapi`]                 |
//! | `/health/*`                   | this module                 |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```

pub mod db;
pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::routing::get;
use axum::Router;

pub use error::AppError;
pub use state::{AppConfig, AppState};

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) sit outside the metrics middleware so that
/// orchestrator polling does not inflate request counts.
pub fn app(state: AppState) -> Router {
    let metrics = state.metrics.clone();

    let api = Router::new()
        .merge(routes::devices::router())
        .merge(openapi::router())
        .route("/metrics", get(middleware::metrics::metrics_handler))
        .layer(from_fn(middleware::metrics::metrics_middleware))
        .layer(middleware::tracing_layer::layer())
        .layer(axum::Extension(metrics));

    let health = Router::new()
        .route("/health/liveness", get(liveness))
        .route("/health/readiness", get(readiness));

    Router::new().merge(health).merge(api).with_state(state)
}

/// Liveness probe: always returns 200 if the process is running.
async fn liveness() -> &'static str {
    "ok"
}

/// Readiness probe: 200 when the backing database answers, 503 otherwise.
async fn readiness(State(state): State<AppState>) -> (StatusCode, &'static str) {
    let Some(pool) = &state.db_pool else {
        return (StatusCode::OK, "ready");
    };

    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => (StatusCode::OK, "ready"),
        Err(e) => {
            tracing::warn!(error = %e, "readiness check failed");
            (StatusCode::SERVICE_UNAVAILABLE, "database unavailable")
        }
    }
}
