//! Response helpers shared by the dispatcher, handlers and the admin API.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

/// Body returned when no route matches.
pub const NO_MATCH_MESSAGE: &str = "No matching route found";

pub fn not_found(path: &str) -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": NO_MATCH_MESSAGE, "path": path })),
    )
        .into_response()
}

pub fn json_error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}
