//! Failures raised by the registration, verification and profile flows.

use thiserror::Error;

use super::repo::StoreError;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("user already exists")]
    DuplicateUser,

    #[error("invalid or expired token")]
    InvalidToken,

    #[error("user not found")]
    UserNotFound,

    #[error("{0}")]
    Validation(String),

    #[error("failed to send verification email: {0}")]
    Mail(#[source] anyhow::Error),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<StoreError> for AuthError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DuplicateEmail => AuthError::DuplicateUser,
            StoreError::Database(e) => AuthError::Internal(e.into()),
        }
    }
}
