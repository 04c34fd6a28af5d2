//! Axum router construction.

use axum::{
    routing::{any, get},
    Router,
};

use super::{handlers, middleware, state::AppState};

/// Build the application [`Router`] with all routes and middleware attached.
///
/// The license and echo routes accept any method so that non-`POST` requests
/// get the endpoint's own 400 instead of a 405.
pub fn build(state: AppState) -> Router {
    Router::new()
        .route("/v1/licensing/verify_key", any(handlers::verify_key))
        .route("/v2/p", any(handlers::echo))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .layer(middleware::trace())
        .layer(middleware::timeout())
        .layer(middleware::compression())
        .with_state(state)
}
