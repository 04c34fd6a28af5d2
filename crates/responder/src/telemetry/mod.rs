//! Structured logging and optional OpenTelemetry span export.
//!
//! Logs are JSON lines on stdout. Request bodies are only logged at `debug`.
//! Log level is configurable via `RESPONDER_LOG_LEVEL` (default: `info`) or
//! `RUST_LOG`.

pub mod init;

pub use init::init_telemetry;
