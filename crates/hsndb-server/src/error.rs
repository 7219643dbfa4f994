//! Server-specific error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::api::response::ErrorResponse;
use crate::db::DbError;
use crate::features::search::{PeptideParseError, SearchProteinsError};
use crate::features::shared::HsnIdValidationError;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::Database(DbError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (code, message) = match self {
            AppError::Database(ref e) => {
                tracing::error!("Database error: {:?}", e);
                ("DATABASE_ERROR", "A database error occurred".to_string())
            },
            AppError::NotFound(message) => ("NOT_FOUND", message),
            AppError::Validation(message) => ("VALIDATION_ERROR", message),
        };

        (status, Json(ErrorResponse::new(code, message))).into_response()
    }
}

impl From<SearchProteinsError> for AppError {
    fn from(err: SearchProteinsError) -> Self {
        match err {
            SearchProteinsError::InvalidField(_) => AppError::Validation(err.to_string()),
        }
    }
}

impl From<PeptideParseError> for AppError {
    fn from(err: PeptideParseError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<HsnIdValidationError> for AppError {
    fn from(err: HsnIdValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

/// Alias for Result with AppError
pub type ApiResult<T> = Result<T, AppError>;
