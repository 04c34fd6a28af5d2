//! Axum request handlers for all service endpoints.

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header, HeaderMap, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use common::protocol::{ErrorResponse, HealthResponse};
use common::ServiceError;
use tracing::{debug, error};

use super::state::AppState;
use crate::license::{builder, validate};

/// `Content-Type` of a successful license response.
pub const LICENSE_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// `POST /v1/licensing/verify_key` — issue a license echoing the request nonce.
///
/// Every validation failure answers 400 with an empty body. Method and
/// content type are checked before the body is read; the body itself is
/// read without a size cap.
pub async fn verify_key(State(state): State<AppState>, req: Request) -> Response {
    let (parts, body) = req.into_parts();
    if let Err(e) = validate::require_json_post(&parts.method, &parts.headers) {
        return reject(e);
    }

    let body = match read_body(body).await {
        Ok(b) => b,
        Err(e) => return reject(e),
    };
    debug!(body = %String::from_utf8_lossy(&body), "license check body");

    let nonce = match validate::extract_nonce(&body) {
        Ok(n) => n,
        Err(e) => return reject(e),
    };

    match builder::issue(&state.profile, nonce, state.clock.now()) {
        Ok(license) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, LICENSE_CONTENT_TYPE),
                (header::X_CONTENT_TYPE_OPTIONS, "nosniff"),
            ],
            license,
        )
            .into_response(),
        Err(e) => reject(e),
    }
}

/// `POST /v2/p` — liveness echo. The body is never read.
pub async fn echo(method: Method, headers: HeaderMap) -> Response {
    match validate::require_json_post(&method, &headers) {
        Ok(()) => (StatusCode::OK, "pong").into_response(),
        Err(e) => reject(e),
    }
}

/// `GET /health` — always `200 OK` once the router is up.
pub async fn health() -> impl IntoResponse {
    Json(HealthResponse { status: "ok".into() })
}

/// Catch-all 404 handler.
pub async fn not_found() -> impl IntoResponse {
    let err = ErrorResponse::new("not_found", "the requested resource does not exist");
    (StatusCode::NOT_FOUND, Json(err))
}

async fn read_body(body: Body) -> Result<Bytes, ServiceError> {
    axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| ServiceError::MalformedBody(format!("failed to read body: {e}")))
}

/// Map a [`ServiceError`] to a status-only response with an empty body.
fn reject(err: ServiceError) -> Response {
    let status =
        StatusCode::from_u16(err.http_status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!(error = %err, "license issuance failed");
    } else {
        debug!(error = %err, "request rejected");
    }
    status.into_response()
}
