//! Configuration loading and validation for the responder.
//!
//! All values are read from `RESPONDER_`-prefixed environment variables at
//! startup. The process exits with a clear error message if any variable is
//! invalid.

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::license::profile::{DEFAULT_CONTACT_EMAIL, DEFAULT_SIGNATURE};
use crate::license::LicenseProfile;

/// Environment variable prefix, e.g. `RESPONDER_HTTP_PORT`.
pub const ENV_PREFIX: &str = "RESPONDER";

/// Validated responder configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Port of the plaintext HTTP listener.
    #[serde(default = "default_http_port")]
    pub http_port: u16,

    /// Port of the TLS listener.
    #[serde(default = "default_https_port")]
    pub https_port: u16,

    /// Path to the PEM certificate chain. Set together with `tls_key_path`;
    /// when both are absent the TLS listener is not started.
    #[serde(default)]
    pub tls_cert_path: Option<String>,

    /// Path to the PEM private key.
    #[serde(default)]
    pub tls_key_path: Option<String>,

    /// `contact_email` reported in every license.
    #[serde(default = "default_contact_email")]
    pub contact_email: String,

    /// Opaque signature attached to every envelope.
    #[serde(default = "default_signature")]
    pub signature: String,

    /// OTLP gRPC endpoint for span export. Logs only when unset.
    #[serde(default)]
    pub otel_exporter_otlp_endpoint: Option<String>,

    /// Tracing log level (e.g. `"info"`, `"debug"`).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Filesystem locations of the TLS certificate chain and private key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TlsPaths {
    pub cert: String,
    pub key: String,
}

fn default_http_port() -> u16 {
    80
}
fn default_https_port() -> u16 {
    443
}
fn default_contact_email() -> String {
    DEFAULT_CONTACT_EMAIL.into()
}
fn default_signature() -> String {
    DEFAULT_SIGNATURE.into()
}
fn default_log_level() -> String {
    "info".into()
}

impl Config {
    /// Load and validate configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if any variable cannot be parsed or fails validation.
    pub fn from_env() -> Result<Self> {
        let cfg = config::Config::builder()
            .add_source(config::Environment::with_prefix(ENV_PREFIX))
            .build()
            .context("failed to build configuration from environment")?;

        let c: Config = cfg
            .try_deserialize()
            .context("failed to deserialise configuration")?;

        c.validate()?;
        Ok(c)
    }

    /// The TLS material locations, or `None` when TLS is disabled.
    pub fn tls_paths(&self) -> Option<TlsPaths> {
        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => Some(TlsPaths {
                cert: cert.clone(),
                key: key.clone(),
            }),
            _ => None,
        }
    }

    /// The license profile described by this configuration.
    pub fn license_profile(&self) -> LicenseProfile {
        LicenseProfile::new(self.contact_email.clone(), self.signature.clone())
    }

    /// Validate all fields, returning a descriptive error on the first failure.
    fn validate(&self) -> Result<()> {
        if self.http_port == 0 {
            anyhow::bail!("RESPONDER_HTTP_PORT must be > 0");
        }
        if self.https_port == 0 {
            anyhow::bail!("RESPONDER_HTTPS_PORT must be > 0");
        }
        if self.http_port == self.https_port {
            anyhow::bail!("RESPONDER_HTTP_PORT and RESPONDER_HTTPS_PORT must differ");
        }
        match (&self.tls_cert_path, &self.tls_key_path) {
            (Some(cert), Some(key)) => {
                ensure_non_empty(cert, "RESPONDER_TLS_CERT_PATH")?;
                ensure_non_empty(key, "RESPONDER_TLS_KEY_PATH")?;
            }
            (None, None) => {}
            _ => anyhow::bail!(
                "RESPONDER_TLS_CERT_PATH and RESPONDER_TLS_KEY_PATH must be set together"
            ),
        }
        ensure_non_empty(&self.contact_email, "RESPONDER_CONTACT_EMAIL")?;
        ensure_non_empty(&self.signature, "RESPONDER_SIGNATURE")?;
        if let Some(endpoint) = &self.otel_exporter_otlp_endpoint {
            ensure_non_empty(endpoint, "RESPONDER_OTEL_EXPORTER_OTLP_ENDPOINT")?;
        }
        Ok(())
    }
}

fn ensure_non_empty(value: &str, name: &str) -> Result<()> {
    if value.trim().is_empty() {
        anyhow::bail!("{name} must not be empty");
    }
    Ok(())
}
