use crate::app::ServiceError;
use crate::transport::http::types::ErrorResponse;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid JSON body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("{0}")]
    BadRequest(String),

    #[error("Person with ID {0} not found")]
    NotFound(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal server error: {0}")]
    Internal(anyhow::Error),
}

impl ApiError {
    pub fn not_found(id: impl Into<String>) -> Self {
        ApiError::NotFound(id.into())
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(e) => ApiError::Validation(e.to_string()),
            ServiceError::EmptyUpdate => ApiError::BadRequest(err.to_string()),
            ServiceError::Conflict(_) => ApiError::Conflict(err.to_string()),
            ServiceError::Storage(e) => ApiError::Internal(e),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, error, details) = match &self {
            ApiError::Validation(details) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Validation error".to_string(),
                Some(details.clone()),
            ),
            ApiError::InvalidBody(rejection) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "Invalid JSON body".to_string(),
                Some(rejection.body_text()),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone(), None),
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, self.to_string(), None),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg.clone(), None),
            ApiError::Internal(err) => {
                tracing::error!(error = ?err, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                    None,
                )
            }
        };

        (status, Json(ErrorResponse { error, details })).into_response()
    }
}
