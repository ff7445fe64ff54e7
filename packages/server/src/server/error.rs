use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::common::{AuthError, ValidationError};

/// Errors returned from HTTP handlers
#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Auth(#[from] AuthError),

    #[error("Not found")]
    NotFound,

    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // Deny reasons stay in the logs; clients only learn "forbidden".
            ApiError::Auth(AuthError::Forbidden(_)) => {
                (StatusCode::FORBIDDEN, "forbidden".to_string())
            }
            ApiError::Auth(AuthError::InvalidToken) => {
                (StatusCode::UNAUTHORIZED, "unauthorized".to_string())
            }
            ApiError::Auth(e @ AuthError::InvalidRequest { .. }) => {
                error!(error = %e, "Handler invoked the authorization gate incorrectly");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
            ApiError::NotFound => (StatusCode::NOT_FOUND, "not found".to_string()),
            ApiError::Validation(e) => (StatusCode::BAD_REQUEST, e.to_string()),
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}
