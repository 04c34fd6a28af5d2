//! License construction: record → JSON → base64 → shaped payload → envelope.

use std::collections::BTreeMap;
use std::num::NonZeroUsize;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use chrono::{DateTime, Months, Utc};
use common::protocol::{LicenseResponse, SignedEnvelope};
use common::ServiceError;

use super::profile::LicenseProfile;
use super::shape::shape;

/// Column width of the base64 payload lines.
pub const PAYLOAD_LINE_WIDTH: NonZeroUsize = match NonZeroUsize::new(60) {
    Some(n) => n,
    None => panic!("payload line width must be non-zero"),
};

/// License lifetime: 30 calendar years.
pub const LICENSE_TERM: Months = Months::new(30 * 12);

/// `YYYY-MM-DDTHH:MM:SSZ`.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Build the license record for `nonce` as of `now`.
///
/// `expires_at` is [`LICENSE_TERM`] after `now`; a day past the end of the
/// target month clamps to its last day (29 Feb → 28 Feb).
///
/// # Errors
///
/// [`ServiceError::Internal`] if the expiry falls outside chrono's range.
pub fn build_license(
    profile: &LicenseProfile,
    nonce: String,
    now: DateTime<Utc>,
) -> Result<LicenseResponse, ServiceError> {
    let expires_at = now
        .checked_add_months(LICENSE_TERM)
        .ok_or_else(|| ServiceError::Internal(format!("license expiry overflows from {now}")))?;

    Ok(LicenseResponse {
        all_features: profile.all_features.clone(),
        available_features: profile.available_features.clone(),
        billing_type: profile.billing_type.clone(),
        contact_email: profile.contact_email.clone(),
        expires_at: format_timestamp(expires_at),
        feature_flag_overrides: BTreeMap::new(),
        license_checked_at: format_timestamp(now),
        max_seats: profile.max_seats,
        nonce,
        success: true,
        trial_expires_at: None,
    })
}

/// Encode `license` into a [`SignedEnvelope`] carrying the profile's signature.
pub fn seal(profile: &LicenseProfile, license: &LicenseResponse) -> Result<SignedEnvelope, ServiceError> {
    let json = serde_json::to_vec(license)
        .map_err(|e| ServiceError::Serialization(format!("license record: {e}")))?;

    Ok(SignedEnvelope {
        payload: shape(&STANDARD.encode(json), PAYLOAD_LINE_WIDTH),
        signature: profile.signature.clone(),
    })
}

/// Produce the wire bytes answering a license check for `nonce`.
pub fn issue(profile: &LicenseProfile, nonce: String, now: DateTime<Utc>) -> Result<Vec<u8>, ServiceError> {
    let license = build_license(profile, nonce, now)?;
    let envelope = seal(profile, &license)?;
    serde_json::to_vec(&envelope)
        .map_err(|e| ServiceError::Serialization(format!("license envelope: {e}")))
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}
