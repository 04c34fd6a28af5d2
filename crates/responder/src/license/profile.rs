//! [`LicenseProfile`]: the fixed, process-wide contents of every issued license.

/// Billing plan reported in every license.
pub const DEFAULT_BILLING_TYPE: &str = "stripe";

/// Seat cap reported in every license.
pub const DEFAULT_MAX_SEATS: u32 = 99_999;

/// Contact address used when none is configured.
pub const DEFAULT_CONTACT_EMAIL: &str = "licensing@example.com";

/// Placeholder signature: base64 of `stub-signature`, wrapped like a payload.
///
/// Clients that really verify signatures will reject it; configure the value
/// the client under test expects.
pub const DEFAULT_SIGNATURE: &str = "c3R1Yi1zaWduYXR1cmU=\n";

/// Every feature of the license tier, in the order clients receive them.
pub const ALL_FEATURES: &[&str] = &[
    "UnlimitedQueries",
    "AuditTrail",
    "AccessControls",
    "SingleSignOn",
    "SharedWorkspaces",
    "ScheduledReports",
    "CustomBranding",
    "Permissions",
    "Theme",
    "UnlimitedModules",
];

/// Features enabled for the issued license, a subset of [`ALL_FEATURES`] in
/// the same relative order.
pub const AVAILABLE_FEATURES: &[&str] = &[
    "UnlimitedQueries",
    "AuditTrail",
    "AccessControls",
    "SingleSignOn",
    "SharedWorkspaces",
    "ScheduledReports",
    "UnlimitedModules",
];

/// Immutable license data built once at startup and shared by all handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LicenseProfile {
    pub billing_type: String,
    pub max_seats: u32,
    pub contact_email: String,
    /// Opaque value copied into every envelope unchanged.
    pub signature: String,
    pub all_features: Vec<String>,
    pub available_features: Vec<String>,
}

impl LicenseProfile {
    /// Build a profile with the built-in feature lists and the given contact
    /// address and signature.
    pub fn new(contact_email: impl Into<String>, signature: impl Into<String>) -> Self {
        Self {
            billing_type: DEFAULT_BILLING_TYPE.into(),
            max_seats: DEFAULT_MAX_SEATS,
            contact_email: contact_email.into(),
            signature: signature.into(),
            all_features: ALL_FEATURES.iter().map(|f| f.to_string()).collect(),
            available_features: AVAILABLE_FEATURES.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl Default for LicenseProfile {
    fn default() -> Self {
        Self::new(DEFAULT_CONTACT_EMAIL, DEFAULT_SIGNATURE)
    }
}
