use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde_json::json;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    UnauthorizedError(String),

    #[error("{0}")]
    ValidationError(String),

    #[error("{0}")]
    NotFoundError(String),

    #[error("{message}: {error}")]
    InternalServerError { message: String, error: String },
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match *self {
            ApiError::UnauthorizedError(..) => StatusCode::UNAUTHORIZED,
            ApiError::ValidationError(..) => StatusCode::BAD_REQUEST,
            ApiError::NotFoundError(..) => StatusCode::NOT_FOUND,
            ApiError::InternalServerError { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    // 4xx carry only a message; 500s also surface the underlying cause.
    fn error_response(&self) -> HttpResponse {
        let body = match self {
            ApiError::UnauthorizedError(message)
            | ApiError::ValidationError(message)
            | ApiError::NotFoundError(message) => json!({ "message": message }),
            ApiError::InternalServerError { message, error } => json!({
                "message": message,
                "error": error,
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}
