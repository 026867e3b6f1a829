use axum::{
    Json,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::domain::ServiceError;
use crate::server::responses::ErrorResponse;

#[derive(Error, Debug)]
pub enum AppError {
    /// The request body could not be read as form data.
    #[error("Invalid form data: {0}")]
    InvalidForm(String),
    #[error("File size exceeds 5MB limit")]
    FileTooLarge,
    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl AppError {
    /// Convenience function to turn a body extraction failure into an error
    pub fn invalid_form<E: std::fmt::Display>(e: E) -> Self {
        tracing::warn!("Rejected form body: {e}");
        AppError::InvalidForm(e.to_string())
    }

    pub fn status(&self) -> &'static str {
        match self {
            AppError::InvalidForm(_) | AppError::FileTooLarge => "validation_error",
            AppError::Service(e) => e.status(),
        }
    }

    /// Convert this error to the JSON body returned to the caller
    pub fn to_response(&self) -> ErrorResponse {
        let details = match self {
            AppError::InvalidForm(_) | AppError::FileTooLarge => None,
            AppError::Service(e) => e.details().map(str::to_string),
        };
        ErrorResponse {
            success: false,
            error: self.to_string(),
            status: self.status(),
            details,
        }
    }
}

// Failures are part of the JSON contract, so they are sent with 200 OK and
// callers branch on `success`/`status`.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Service(ServiceError::System { details }) => {
                tracing::error!(status = self.status(), %details, "Request failed");
            }
            _ => tracing::info!(status = self.status(), error = %self, "Request rejected"),
        }
        Json(self.to_response()).into_response()
    }
}
