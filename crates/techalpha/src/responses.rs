//! JSON error bodies shared by the form and payment routers.

use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

pub const MISSING_FIELDS: &str = "All fields are required";
pub const INVALID_BODY: &str = "Invalid request body";

pub(crate) fn missing_fields(fields: &[&'static str]) -> Response {
    let payload = json!({
        "error": MISSING_FIELDS,
        "missing_fields": fields,
    });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

/// Malformed JSON, wrong content type, or mistyped fields all collapse into one 400.
pub(crate) fn invalid_body(route: &'static str, rejection: JsonRejection) -> Response {
    warn!(route, reason = %rejection.body_text(), "rejected request body");
    let payload = json!({ "error": INVALID_BODY });
    (StatusCode::BAD_REQUEST, Json(payload)).into_response()
}

pub(crate) fn server_error(message: &'static str) -> Response {
    let payload = json!({ "error": message });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
}
