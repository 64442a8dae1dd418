use axum::{
    Json,
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use http::StatusCode;
use passkey_enroll::CoordinationError;

use crate::response::ApiResponse;

/// Error half of every handler result, rendered as a failure envelope
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(ApiResponse::<()>::failure(self.message))).into_response()
    }
}

impl From<CoordinationError> for ApiError {
    fn from(e: CoordinationError) -> Self {
        let (status, message) = match e {
            CoordinationError::MissingField(_) => (StatusCode::FORBIDDEN, e.to_string()),
            CoordinationError::AlreadyBound(_) => (
                StatusCode::FORBIDDEN,
                "Registration already complete. Try logging in".to_string(),
            ),
            CoordinationError::NotFound(_) => (StatusCode::NOT_FOUND, e.to_string()),
            CoordinationError::VerificationFailed(_) => (StatusCode::UNAUTHORIZED, e.to_string()),
            CoordinationError::Internal(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal server error".to_string(),
            ),
        };
        ApiError { status, message }
    }
}

/// A body that is valid JSON but lacks a field the request type needs is a
/// `MissingField`; other rejections keep axum's status inside the envelope.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        match rejection {
            JsonRejection::JsonDataError(e) => {
                let detail = e.body_text();
                let detail = detail
                    .strip_prefix("Failed to deserialize the JSON body into the target type: ")
                    .unwrap_or(detail.as_str());
                CoordinationError::MissingField(detail.to_string())
                    .log()
                    .into()
            }
            other => {
                tracing::warn!("Rejected request body: {}", other.body_text());
                ApiError {
                    status: other.status(),
                    message: other.body_text(),
                }
            }
        }
    }
}

/// Helper trait for converting errors to a standard response error format
pub trait IntoResponseError<T> {
    fn into_response_error(self) -> Result<T, ApiError>;
}

/// Maps coordination failures onto status codes
impl<T> IntoResponseError<T> for Result<T, CoordinationError> {
    fn into_response_error(self) -> Result<T, ApiError> {
        self.map_err(ApiError::from)
    }
}
