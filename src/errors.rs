use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("{0}")]
    IncompleteSubmission(String),

    #[error("Malformed generation: {0}")]
    MalformedGeneration(String),

    #[error("Generation failed: {0}")]
    GenerationFailed(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::IncompleteSubmission(_) => "INCOMPLETE_SUBMISSION",
            AppError::MalformedGeneration(_) => "MALFORMED_GENERATION",
            AppError::GenerationFailed(_) => "GENERATION_FAILED",
            AppError::InvalidState(_) => "INVALID_STATE",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Whether the client can simply re-trigger the same request.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            AppError::MalformedGeneration(_) | AppError::GenerationFailed(_)
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: u16,
    pub error_code: &'static str,
    pub retryable: bool,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::IncompleteSubmission(_) => StatusCode::BAD_REQUEST,
            AppError::MalformedGeneration(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::GenerationFailed(_) => StatusCode::BAD_GATEWAY,
            AppError::InvalidState(_) => StatusCode::CONFLICT,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.to_string(),
            code: self.status_code().as_u16(),
            error_code: self.error_code(),
            retryable: self.is_retryable(),
        })
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            AppError::GenerationFailed(format!("timeout: {}", err))
        } else {
            AppError::GenerationFailed(err.to_string())
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
