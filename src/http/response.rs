//! Response shaping shared by both entry points.
//!
//! # Responsibilities
//! - Add cross-origin headers to relayed upstream responses
//! - Build the JSON error bodies callers can always parse
//!
//! # Design Decisions
//! - CORS headers override whatever the upstream sent
//! - Locally generated errors never carry CORS headers

use axum::{
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

pub const ALLOWED_METHODS: &str = "GET, POST, OPTIONS";

/// Set `Access-Control-Allow-Origin: *`.
pub fn allow_any_origin(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
}

/// Set the three permissive CORS headers used by the transparent proxy.
pub fn apply_permissive_cors(headers: &mut HeaderMap) {
    allow_any_origin(headers);
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static(ALLOWED_METHODS),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("*"),
    );
}

/// `{ "error": { "message": ... } }` with the given status.
pub fn error_message(status: StatusCode, message: impl Into<String>) -> Response {
    let body = json!({ "error": { "message": message.into() } });
    (status, Json(body)).into_response()
}

/// `{ "error": ..., "location": ... }` with status 500.
pub fn transport_failure(message: impl Into<String>, location: &str) -> Response {
    let body = json!({ "error": message.into(), "location": location });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
}
