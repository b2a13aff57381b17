use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use common::types::{ErrorBody, MessageBody};
use common::CoreError;
use service::auth::errors::AuthError;
use service::errors::ServiceError;
use thiserror::Error;
use tracing::{error, warn};

/// Errors surfaced to HTTP clients.
///
/// Client-facing notices render as `{"message": ...}`, everything else as
/// `{"error": ...}` carrying the underlying message.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("User already exists")]
    DuplicateUser,
    #[error("Invalid credentials. Email or password is incorrect!")]
    InvalidCredentials,
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    InvalidToken(String),
    /// Registration failures other than a duplicate; answered with 451.
    #[error("{0}")]
    Persistence(String),
    #[error("{0}")]
    Internal(String),
    #[error("{0}")]
    Upstream(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::DuplicateUser | ApiError::InvalidCredentials => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized | ApiError::InvalidToken(_) => StatusCode::UNAUTHORIZED,
            ApiError::Persistence(_) => StatusCode::UNAVAILABLE_FOR_LEGAL_REASONS,
            ApiError::Internal(_) | ApiError::Upstream(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn from_register(e: AuthError) -> Self {
        match e {
            AuthError::Conflict => ApiError::DuplicateUser,
            other => ApiError::Persistence(other.to_string()),
        }
    }

    pub fn from_login(e: AuthError) -> Self {
        match e {
            AuthError::Unauthorized => ApiError::InvalidCredentials,
            other => ApiError::Internal(other.to_string()),
        }
    }

    pub fn from_validate(e: AuthError) -> Self {
        match e {
            AuthError::MissingToken => ApiError::Unauthorized,
            AuthError::InvalidToken(_) | AuthError::NotFound => ApiError::InvalidToken(e.to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(e: ServiceError) -> Self { ApiError::Internal(e.to_string()) }
}

impl From<CoreError> for ApiError {
    fn from(e: CoreError) -> Self { ApiError::Upstream(e.to_string()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let msg = self.to_string();
        match self {
            ApiError::DuplicateUser | ApiError::InvalidCredentials | ApiError::Unauthorized => {
                (status, Json(MessageBody { message: msg })).into_response()
            }
            ApiError::InvalidToken(_) => {
                warn!(error = %msg, "token rejected");
                (status, Json(ErrorBody { error: msg })).into_response()
            }
            ApiError::Persistence(_) | ApiError::Internal(_) | ApiError::Upstream(_) => {
                error!(status = status.as_u16(), error = %msg, "request failed");
                (status, Json(ErrorBody { error: msg })).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("database unavailable: {0}")]
    Database(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
