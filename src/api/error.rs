//! Mapping from crate errors to HTTP responses

use crate::api::models::ErrorResponse;
use crate::core::error::TodoError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;

/// Error returned from request handlers
#[derive(Debug)]
pub struct ApiError(pub TodoError);

impl From<TodoError> for ApiError {
    fn from(err: TodoError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self.0 {
            TodoError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            TodoError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (error, message) = match self.0 {
            TodoError::InvalidRequest(message) => {
                tracing::warn!(%message, "rejected request");
                ("InvalidRequest", message)
            }
            TodoError::NotFound(message) => ("NotFound", message),
            other => {
                tracing::error!(error = %other, "unhandled error");
                (
                    "InternalServerError",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = ErrorResponse {
            error: error.into(),
            message,
            timestamp: Utc::now(),
        };
        (status, Json(body)).into_response()
    }
}
