use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use capacity::ValidationError;
use serde::Serialize;
use std::fmt;

use crate::domain::AllocationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationFailed,
    ResourceNotFound,
    ProjectNotFound,
    ConstraintViolation,
    InternalError,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    code: Option<ErrorCode>,
}

#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    code: Option<ErrorCode>,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            code: None,
        }
    }

    pub fn with_code(mut self, code: ErrorCode) -> Self {
        self.code = Some(code);
        self
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, message).with_code(ErrorCode::InternalError)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.message,
            code: self.code,
        };
        (self.status, Json(body)).into_response()
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        Self::bad_request(err.to_string()).with_code(ErrorCode::ValidationFailed)
    }
}

impl From<AllocationError> for ApiError {
    fn from(err: AllocationError) -> Self {
        match err {
            AllocationError::Validation(e) => e.into(),
            AllocationError::ResourceNotFound(_) => {
                Self::not_found(err.to_string()).with_code(ErrorCode::ResourceNotFound)
            }
            AllocationError::ProjectNotFound(_) => {
                Self::not_found(err.to_string()).with_code(ErrorCode::ProjectNotFound)
            }
            AllocationError::ConstraintViolation(msg) => {
                Self::conflict(msg).with_code(ErrorCode::ConstraintViolation)
            }
            AllocationError::Storage(ref msg) => {
                tracing::error!("Storage error: {}", msg);
                Self::internal("An internal error occurred")
            }
        }
    }
}
