use axum::extract::rejection::JsonRejection;
use axum::{Json, http::StatusCode, response::{IntoResponse, Response}};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Connection error: {0}")]
    Connection(sqlx::Error),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid request body: {0}")]
    InvalidBody(#[from] JsonRejection),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("Invalid id: {0}")]
    InvalidId(String),

    #[error("Invalid link")]
    InvalidLink,

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Provider error: {0}")]
    Provider(String),
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation(_)
            | AppError::InvalidBody(_)
            | AppError::InvalidId(_)
            | AppError::InvalidLink => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Database(_)
            | AppError::Connection(_)
            | AppError::Configuration(_)
            | AppError::Authentication(_)
            | AppError::Provider(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            AppError::Validation(msg) => msg.clone(),
            AppError::InvalidBody(rejection) => {
                format!("Invalid request body: {}", rejection.body_text())
            }
            AppError::InvalidId(_) | AppError::InvalidLink | AppError::NotFound(_) => {
                self.to_string()
            }
            internal => {
                error!("request failed: {}", internal);
                "Internal server error".to_string()
            }
        };

        let body = Json(ErrorResponse {
            error: status.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
