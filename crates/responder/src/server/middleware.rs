//! Axum middleware layers applied to the router.
//!
//! Includes request tracing, timeout enforcement, and response compression.

use std::time::Duration;

use tower_http::{
    classify::{ServerErrorsAsFailures, SharedClassifier},
    compression::CompressionLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

/// Default per-request timeout applied to all routes.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Per-request timeout layer using [`REQUEST_TIMEOUT`].
pub fn timeout() -> TimeoutLayer {
    TimeoutLayer::new(REQUEST_TIMEOUT)
}

/// Negotiated response compression (gzip, deflate, br, zstd) for clients that
/// send `Accept-Encoding`.
pub fn compression() -> CompressionLayer {
    CompressionLayer::new()
}

/// HTTP request/response span layer.
pub fn trace() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>> {
    TraceLayer::new_for_http()
}
