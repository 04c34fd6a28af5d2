//! Shared application state injected into every Axum handler.

use std::sync::Arc;

use crate::license::{Clock, LicenseProfile, SystemClock};

/// Application state shared across all request handlers.
///
/// Both fields are `Arc`-wrapped and read-only, so Axum can clone the state
/// for each request without copying the profile.
#[derive(Clone)]
pub struct AppState {
    /// Fixed license contents, built once at startup.
    pub profile: Arc<LicenseProfile>,
    /// Time source for `license_checked_at` / `expires_at`.
    pub clock: Arc<dyn Clock>,
}

impl AppState {
    /// Create a new [`AppState`] from a profile and a clock.
    pub fn new(profile: LicenseProfile, clock: Arc<dyn Clock>) -> Self {
        Self {
            profile: Arc::new(profile),
            clock,
        }
    }
}

impl Default for AppState {
    /// Default profile with the system clock, suitable for tests.
    fn default() -> Self {
        Self::new(LicenseProfile::default(), Arc::new(SystemClock))
    }
}
