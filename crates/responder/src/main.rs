//! `license-responder` — binary entry point.
//!
//! Startup sequence:
//! 1. Load and validate [`Config`] from environment variables.
//! 2. Initialise the telemetry pipeline (JSON logs, optional OTLP).
//! 3. Build the process-wide license profile and the Axum router.
//! 4. Read the TLS certificate and key, if configured.
//! 5. Run the HTTP and HTTPS listeners until either fails.

mod config;
mod license;
mod server;
mod telemetry;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::config::Config;
use license::SystemClock;
use server::{listener, state::AppState, tls};

#[tokio::main]
async fn main() -> Result<()> {
    // -----------------------------------------------------------------------
    // 1. Configuration
    // -----------------------------------------------------------------------
    let cfg = Config::from_env().map_err(|e| {
        // Telemetry is not yet up; write to stderr directly.
        eprintln!("ERROR: configuration invalid: {e:#}");
        e
    })?;

    // -----------------------------------------------------------------------
    // 2. Telemetry
    // -----------------------------------------------------------------------
    telemetry::init_telemetry(cfg.otel_exporter_otlp_endpoint.as_deref(), &cfg.log_level)?;
    info!(
        version = env!("CARGO_PKG_VERSION"),
        http_port = cfg.http_port,
        https_port = cfg.https_port,
        "license-responder starting"
    );

    // -----------------------------------------------------------------------
    // 3. Router
    // -----------------------------------------------------------------------
    let state = AppState::new(cfg.license_profile(), Arc::new(SystemClock));
    let router = server::router::build(state);

    // -----------------------------------------------------------------------
    // 4. TLS material
    // -----------------------------------------------------------------------
    let tls_config = match cfg.tls_paths() {
        Some(paths) => {
            let cert_pem = tokio::fs::read(&paths.cert)
                .await
                .with_context(|| format!("failed to read TLS certificate {}", paths.cert))?;
            let key_pem = tokio::fs::read(&paths.key)
                .await
                .with_context(|| format!("failed to read TLS private key {}", paths.key))?;
            Some(tls::build_server_config(&cert_pem, &key_pem)?)
        }
        None => {
            warn!("RESPONDER_TLS_CERT_PATH / RESPONDER_TLS_KEY_PATH not set; https listener disabled");
            None
        }
    };

    // -----------------------------------------------------------------------
    // 5. Listeners
    // -----------------------------------------------------------------------
    let http_addr: SocketAddr = ([0, 0, 0, 0], cfg.http_port).into();
    let http = listener::serve_http(http_addr, router.clone());

    match tls_config {
        Some(tls_config) => {
            let https_addr: SocketAddr = ([0, 0, 0, 0], cfg.https_port).into();
            let https = listener::serve_https(https_addr, tls_config, router);
            tokio::try_join!(http, https)?;
        }
        None => http.await?,
    }

    Ok(())
}
