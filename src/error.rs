use axum::{
    Json,
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;
use validator::ValidationErrors;

use crate::{dao::storage::StorageError, dto::validation::failed_fields};

/// Errors that can occur in service layer operations.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// A required input was absent or blank.
    #[error("missing field: {0}")]
    MissingField(String),
    /// A value outside its enumerated set.
    #[error("invalid value `{value}` for `{field}`")]
    InvalidEnum { field: &'static str, value: String },
    /// A number outside its allowed range.
    #[error("`{field}` must be between {min} and {max} (got {value})")]
    OutOfRange {
        field: &'static str,
        value: String,
        min: i64,
        max: i64,
    },
    /// Requested resource was not found.
    #[error("not found: {0}")]
    NotFound(String),
    /// A uniqueness rule prevented the operation.
    #[error("conflict: {0}")]
    Conflict(String),
    /// Missing session or bad credentials.
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    /// Storage backend failed.
    #[error("storage unavailable")]
    Unavailable(#[source] StorageError),
    /// Unexpected failure unrelated to the request contents.
    #[error("internal error: {0}")]
    Internal(String),
    /// Session store failed.
    #[error("session store failure")]
    Session(#[from] tower_sessions::session::Error),
}

impl From<StorageError> for ServiceError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::Conflict { message } => ServiceError::Conflict(message),
            other => ServiceError::Unavailable(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(err: ValidationErrors) -> Self {
        ServiceError::MissingField(failed_fields(&err))
    }
}

/// Application-level errors that are converted to HTTP responses.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("missing field: {0}")]
    MissingField(String),
    #[error("{0}")]
    InvalidEnum(String),
    #[error("{0}")]
    OutOfRange(String),
    /// The request body could not be read.
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unauthorized: {0}")]
    Unauthorized(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    /// Internal failure; the detail is logged, never returned.
    #[error("internal server error")]
    Internal,
}

impl AppError {
    /// Stable machine-readable kind reported in the `error` field.
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::MissingField(_) => "MissingField",
            AppError::InvalidEnum(_) => "InvalidEnum",
            AppError::OutOfRange(_) => "OutOfRange",
            AppError::BadRequest(_) => "BadRequest",
            AppError::Unauthorized(_) => "Unauthorized",
            AppError::NotFound(_) => "NotFound",
            AppError::Conflict(_) => "Conflict",
            AppError::Internal => "Internal",
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::MissingField(_)
            | AppError::InvalidEnum(_)
            | AppError::OutOfRange(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<ServiceError> for AppError {
    fn from(err: ServiceError) -> Self {
        let message = err.to_string();
        match err {
            ServiceError::MissingField(fields) => AppError::MissingField(fields),
            ServiceError::InvalidEnum { .. } => AppError::InvalidEnum(message),
            ServiceError::OutOfRange { .. } => AppError::OutOfRange(message),
            ServiceError::NotFound(what) => AppError::NotFound(what),
            ServiceError::Conflict(what) => AppError::Conflict(what),
            ServiceError::Unauthorized(why) => AppError::Unauthorized(why),
            ServiceError::Unavailable(source) => {
                error!(error = %source, detail = ?source, "storage failure while serving request");
                AppError::Internal
            }
            ServiceError::Internal(detail) => {
                error!(detail = %detail, "internal failure while serving request");
                AppError::Internal
            }
            ServiceError::Session(source) => {
                error!(error = %source, "session store failure while serving request");
                AppError::Internal
            }
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// JSON body of every error response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let payload = Json(ErrorBody {
            error: self.kind().to_string(),
            message: self.to_string(),
        });

        (self.status(), payload).into_response()
    }
}
