use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use linkshield_common::error::LinkshieldError;

pub struct ApiError(pub LinkshieldError);

impl From<LinkshieldError> for ApiError {
    fn from(err: LinkshieldError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            LinkshieldError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            LinkshieldError::Decode(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            LinkshieldError::NoQrPayload => (StatusCode::BAD_REQUEST, self.0.to_string()),
            LinkshieldError::ModelUnavailable(msg) => (
                StatusCode::SERVICE_UNAVAILABLE,
                format!("model service unavailable: {msg}"),
            ),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()),
        };

        let body = serde_json::json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
