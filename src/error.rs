//! Request-level errors and their HTTP mapping.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::models::InvalidLevel;

/// Errors caused by bad request input. Nothing is logged for either variant.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ---
    #[error(transparent)]
    InvalidLevel(#[from] InvalidLevel),

    #[error("Invalid count: {value}. Count {reason}")]
    InvalidCount { value: String, reason: String },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // ---
        let status = match &self {
            AppError::InvalidLevel(_) | AppError::InvalidCount { .. } => StatusCode::BAD_REQUEST,
        };
        tracing::debug!(%status, error = %self, "Rejected request");

        (status, self.to_string()).into_response()
    }
}
