//! Request qualification for the license and echo endpoints.
//!
//! Both endpoints accept only `POST` with a `Content-Type` of exactly
//! `application/json`. The license endpoint additionally needs a JSON object
//! body carrying a string `nonce`.

use axum::http::{header, HeaderMap, Method};
use common::ServiceError;

/// The only accepted `Content-Type`, compared byte for byte.
pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Reject anything that is not a `POST` with `Content-Type: application/json`.
pub fn require_json_post(method: &Method, headers: &HeaderMap) -> Result<(), ServiceError> {
    if method != Method::POST {
        return Err(ServiceError::MethodNotAllowed(method.to_string()));
    }
    match headers.get(header::CONTENT_TYPE) {
        Some(v) if v.as_bytes() == JSON_CONTENT_TYPE.as_bytes() => Ok(()),
        Some(v) => Err(ServiceError::UnsupportedContentType(
            String::from_utf8_lossy(v.as_bytes()).into_owned(),
        )),
        None => Err(ServiceError::UnsupportedContentType("<missing>".into())),
    }
}

/// Extract the `nonce` string from a license-check body.
///
/// Invalid UTF-8 sequences are replaced with U+FFFD before parsing, so a
/// nonce carrying stray bytes is accepted in its replaced form. Outside of a
/// string the replacement character is still a syntax error.
///
/// # Errors
///
/// [`ServiceError::MalformedBody`] if the body is not a JSON object,
/// [`ServiceError::MissingOrInvalidField`] if `nonce` is absent or not a string.
pub fn extract_nonce(body: &[u8]) -> Result<String, ServiceError> {
    let text = String::from_utf8_lossy(body);
    let mut args: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&text).map_err(|e| ServiceError::MalformedBody(e.to_string()))?;

    match args.remove("nonce") {
        Some(serde_json::Value::String(nonce)) => Ok(nonce),
        Some(other) => Err(ServiceError::MissingOrInvalidField(format!(
            "nonce must be a string, got {}",
            json_type_name(&other)
        ))),
        None => Err(ServiceError::MissingOrInvalidField("nonce is missing".into())),
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "bool",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn json_headers() -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        h
    }

    #[test]
    fn accepts_post_with_json_content_type() {
        assert!(require_json_post(&Method::POST, &json_headers()).is_ok());
    }

    #[test]
    fn rejects_other_methods() {
        for m in [Method::GET, Method::PUT, Method::DELETE, Method::HEAD] {
            let err = require_json_post(&m, &json_headers()).unwrap_err();
            assert!(matches!(err, ServiceError::MethodNotAllowed(_)), "{m}");
        }
    }

    #[test]
    fn rejects_missing_content_type() {
        let err = require_json_post(&Method::POST, &HeaderMap::new()).unwrap_err();
        assert!(matches!(err, ServiceError::UnsupportedContentType(_)));
    }

    #[test]
    fn content_type_match_is_literal() {
        for ct in [
            "application/json; charset=utf-8",
            "Application/JSON",
            "text/plain",
            " application/json",
        ] {
            let mut h = HeaderMap::new();
            h.insert(header::CONTENT_TYPE, HeaderValue::from_str(ct).unwrap());
            let err = require_json_post(&Method::POST, &h).unwrap_err();
            assert!(matches!(err, ServiceError::UnsupportedContentType(_)), "{ct}");
        }
    }

    #[test]
    fn extracts_string_nonce() {
        let nonce = extract_nonce(br#"{"nonce":"abc-123","other":1}"#).unwrap();
        assert_eq!(nonce, "abc-123");
    }

    #[test]
    fn empty_string_nonce_is_accepted() {
        assert_eq!(extract_nonce(br#"{"nonce":""}"#).unwrap(), "");
    }

    #[test]
    fn invalid_utf8_in_nonce_is_replaced() {
        let nonce = extract_nonce(b"{\"nonce\":\"a\xffb\xc3\"}").unwrap();
        assert_eq!(nonce, "a\u{FFFD}b\u{FFFD}");
    }

    #[test]
    fn invalid_utf8_outside_strings_is_malformed() {
        let err = extract_nonce(b"{\"nonce\":\"a\"\xff}").unwrap_err();
        assert!(matches!(err, ServiceError::MalformedBody(_)));
    }

    #[test]
    fn malformed_json_is_rejected() {
        for body in [&b""[..], b"{", b"not json", b"[\"nonce\"]", b"\"nonce\""] {
            let err = extract_nonce(body).unwrap_err();
            assert!(matches!(err, ServiceError::MalformedBody(_)));
        }
    }

    #[test]
    fn missing_nonce_is_rejected() {
        let err = extract_nonce(br#"{"other":"x"}"#).unwrap_err();
        assert!(matches!(err, ServiceError::MissingOrInvalidField(_)));
    }

    #[test]
    fn non_string_nonce_is_rejected() {
        for body in [
            &br#"{"nonce":1}"#[..],
            br#"{"nonce":null}"#,
            br#"{"nonce":true}"#,
            br#"{"nonce":["a"]}"#,
            br#"{"nonce":{"v":"a"}}"#,
        ] {
            let err = extract_nonce(body).unwrap_err();
            assert!(matches!(err, ServiceError::MissingOrInvalidField(_)));
        }
    }
}
