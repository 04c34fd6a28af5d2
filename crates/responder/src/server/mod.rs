//! Axum HTTP/HTTPS server, routing, and middleware.
//!
//! # Responsibilities
//! - Bind the plaintext and TLS listeners (rustls via tokio-rustls).
//! - Define the Axum router with all routes and shared middleware.
//! - Inject shared application state (`AppState`) into handlers.

pub mod handlers;
pub mod listener;
pub mod middleware;
pub mod router;
pub mod state;
pub mod tls;
