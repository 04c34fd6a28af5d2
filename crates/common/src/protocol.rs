//! Request and response types exchanged with license-check clients.
//!
//! Everything here is serialised as JSON over both the plaintext and the TLS
//! listener.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// License check endpoint
// ---------------------------------------------------------------------------

/// The license record embedded (base64, line-wrapped) in
/// [`SignedEnvelope::payload`].
///
/// Fields are declared in lexicographic key order so the encoded object has
/// the same key layout as a sorted-map encoder would produce.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LicenseResponse {
    /// Every feature the license tier knows about.
    pub all_features: Vec<String>,
    /// Features enabled for this license.
    pub available_features: Vec<String>,
    pub billing_type: String,
    /// Contact address shown by the client for the license holder.
    pub contact_email: String,
    /// `YYYY-MM-DDTHH:MM:SSZ`, UTC.
    pub expires_at: String,
    /// Always empty.
    pub feature_flag_overrides: BTreeMap<String, serde_json::Value>,
    /// `YYYY-MM-DDTHH:MM:SSZ`, UTC.
    pub license_checked_at: String,
    pub max_seats: u32,
    /// Caller-supplied nonce, echoed verbatim.
    pub nonce: String,
    pub success: bool,
    /// Always `null`.
    pub trial_expires_at: Option<String>,
}

/// Successful response body for `POST /v1/licensing/verify_key`.
///
/// `signature` is a fixed opaque value; it is not computed over `payload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedEnvelope {
    /// Base64 of the [`LicenseResponse`] JSON, wrapped at 60 columns.
    pub payload: String,
    pub signature: String,
}

// ---------------------------------------------------------------------------
// Error response
// ---------------------------------------------------------------------------

/// Error body returned for unknown routes.
///
/// Validation failures on the license and echo endpoints never carry a body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Short machine-readable error code (e.g. `"not_found"`).
    pub code: String,
    /// Human-readable description safe to expose to callers.
    pub message: String,
}

impl ErrorResponse {
    /// Construct an [`ErrorResponse`] from a code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Health check
// ---------------------------------------------------------------------------

/// Response body for `GET /health`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always `"ok"` once the router is serving.
    pub status: String,
}
