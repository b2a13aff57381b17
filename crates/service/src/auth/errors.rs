use thiserror::Error;

use super::token::TokenError;

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user already exists")]
    Conflict,
    #[error("invalid credentials")]
    Unauthorized,
    #[error("missing authorization token")]
    MissingToken,
    #[error("{0}")]
    InvalidToken(#[from] TokenError),
    #[error("user not found")]
    NotFound,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    TokenIssue(String),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthorized => 1004,
            AuthError::MissingToken => 1005,
            AuthError::InvalidToken(_) => 1006,
            AuthError::HashError(_) => 1101,
            AuthError::TokenIssue(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

impl From<models::errors::ModelError> for AuthError {
    fn from(e: models::errors::ModelError) -> Self {
        match e {
            models::errors::ModelError::Conflict(_) => AuthError::Conflict,
            other => AuthError::Repository(other.to_string()),
        }
    }
}
