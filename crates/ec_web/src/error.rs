use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// Fault on a read path, rendered as `{"error": message}`.
#[derive(Debug)]
pub struct ApiError(pub ec_core::Error);

impl From<ec_core::Error> for ApiError {
    fn from(err: ec_core::Error) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = if self.0.is_client_error() {
            StatusCode::BAD_REQUEST
        } else {
            StatusCode::INTERNAL_SERVER_ERROR
        };
        tracing::error!("Request failed with {}: {}", status, self.0);
        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}
