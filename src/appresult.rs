use axum::{
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

use crate::{store::StoreError, validate::InvalidRoomName};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug, Error)]
pub enum AppError {
    /// Malformed or blank input.
    #[error("{0}")]
    Validation(String),

    #[error("Room not found")]
    NotFound,

    /// Uniqueness constraint rejected the write.
    #[error("{0}")]
    Conflict(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::NotFound => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let detail = match &self {
            AppError::Internal(err) => {
                tracing::error!("internal error: {err:?}");
                "Internal server error".to_owned()
            }
            other => other.to_string(),
        };

        (status, Json(ErrorBody { detail })).into_response()
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NameTaken(name) => {
                AppError::Conflict(format!("A room named '{name}' already exists"))
            }
            StoreError::Sqlx(err) => AppError::Internal(err.into()),
        }
    }
}

impl From<InvalidRoomName> for AppError {
    fn from(err: InvalidRoomName) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}
