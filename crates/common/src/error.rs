//! Common error types shared across crates.

use thiserror::Error;

/// Top-level service error type.
///
/// The request-validation variants all collapse to the same wire outcome
/// (400 with an empty body); they stay distinct for logging and tests.
/// - [`ServiceError::MethodNotAllowed`] → 400
/// - [`ServiceError::UnsupportedContentType`] → 400
/// - [`ServiceError::MalformedBody`] → 400
/// - [`ServiceError::MissingOrInvalidField`] → 400
/// - [`ServiceError::Serialization`] → 500
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request used a method other than `POST`.
    #[error("method not allowed: {0}")]
    MethodNotAllowed(String),

    /// The `Content-Type` header was absent or not exactly `application/json`.
    #[error("unsupported content type: {0}")]
    UnsupportedContentType(String),

    /// The body is not a JSON object.
    #[error("malformed body: {0}")]
    MalformedBody(String),

    /// A required field is absent or has the wrong JSON type.
    #[error("missing or invalid field: {0}")]
    MissingOrInvalidField(String),

    /// Encoding an in-memory response record failed.
    #[error("serialization failure: {0}")]
    Serialization(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            ServiceError::MethodNotAllowed(_)
            | ServiceError::UnsupportedContentType(_)
            | ServiceError::MalformedBody(_)
            | ServiceError::MissingOrInvalidField(_) => 400,
            ServiceError::Serialization(_) => 500,
            ServiceError::Internal(_) => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_status_codes() {
        assert_eq!(ServiceError::MethodNotAllowed("GET".into()).http_status(), 400);
        assert_eq!(
            ServiceError::UnsupportedContentType("text/plain".into()).http_status(),
            400
        );
        assert_eq!(ServiceError::MalformedBody("x".into()).http_status(), 400);
        assert_eq!(
            ServiceError::MissingOrInvalidField("nonce".into()).http_status(),
            400
        );
        assert_eq!(ServiceError::Serialization("x".into()).http_status(), 500);
        assert_eq!(ServiceError::Internal("x".into()).http_status(), 500);
    }

    #[test]
    fn display_includes_message() {
        let e = ServiceError::MissingOrInvalidField("nonce".into());
        assert!(e.to_string().contains("nonce"));
    }
}
