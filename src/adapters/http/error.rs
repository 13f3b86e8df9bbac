use crate::application::ServiceError;
use axum::{
    extract::rejection::{HostRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use std::fmt;

pub type AppResult<T> = Result<T, AppError>;

/// Error rendered as `{"error": message}` with a status code.
#[derive(Debug)]
pub struct AppError {
    pub status: StatusCode,
    pub message: String,
}

impl AppError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    pub fn method_not_allowed() -> Self {
        Self::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
    }

    pub fn not_found() -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not found")
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.status, self.message)
    }
}

impl std::error::Error for AppError {}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (self.status, Json(ErrorBody { error: self.message })).into_response()
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::StreamNotFound(_) => AppError::new(StatusCode::NOT_FOUND, err.to_string()),
            ServiceError::InvalidStatus(_) => AppError::new(StatusCode::BAD_REQUEST, err.to_string()),
            ServiceError::Repository(e) => {
                tracing::error!("Repository error: {}", e);
                AppError::new(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
            }
        }
    }
}

// Only numeric ids are routable, anything else is an unknown page.
impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        tracing::debug!("Path rejected: {}", rejection.body_text());
        AppError::not_found()
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl From<HostRejection> for AppError {
    fn from(rejection: HostRejection) -> Self {
        AppError::new(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

pub async fn method_not_allowed() -> AppError {
    AppError::method_not_allowed()
}

pub async fn not_found() -> AppError {
    AppError::not_found()
}
