//! # Request/Response Tracing
//!
//! `tower_http::trace::TraceLayer` for per-request spans, and the
//! subscriber setup used by the binary.

use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::state::LogFormat;

/// Build the `TraceLayer` for the device API.
///
/// Each request gets a span with method, URI, and status code.
pub fn layer() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}

/// Install the global tracing subscriber.
///
/// The filter comes from `RUST_LOG`, defaulting to `info`.
pub fn init_subscriber(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    match format {
        LogFormat::Json => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init(),
        LogFormat::Text => tracing_subscriber::fmt().with_env_filter(filter).init(),
    }
}
