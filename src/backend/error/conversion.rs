/**
 * Error Response Conversion
 *
 * Converts [`BackendError`] into an axum HTTP response with a JSON body of
 * the shape `{"error": "...", "status": 4xx}`. Server-side failures are
 * logged here so handlers only need to return `Result<_, BackendError>`.
 */

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use super::types::BackendError;

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        if status.is_server_error() {
            tracing::error!("[Error] {} - {}", status, message);
        } else {
            tracing::debug!("[Error] {} - {}", status, message);
        }

        let body = Json(json!({
            "error": message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

/// Shorthand used by multipart handlers when a request body is unreadable.
pub fn bad_request(message: impl Into<String>) -> BackendError {
    BackendError::handler(StatusCode::BAD_REQUEST, message)
}
