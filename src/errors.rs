use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use tracing::{error, warn};

use crate::auth::errors::AuthError;

/// Client-facing failure: a status and a fixed message.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }

    /// Collapses a flow failure into what the endpoint tells the caller.
    /// Only duplicates and validation failures keep their own message;
    /// everything else becomes a 400 with `fallback`.
    pub fn from_auth(err: AuthError, fallback: &str) -> Self {
        match err {
            AuthError::DuplicateUser => Self::new(StatusCode::CONFLICT, "User already exists"),
            AuthError::Validation(msg) => Self::new(StatusCode::BAD_REQUEST, msg),
            AuthError::InvalidToken | AuthError::UserNotFound => {
                warn!(error = %err, "request rejected");
                Self::new(StatusCode::BAD_REQUEST, fallback)
            }
            AuthError::Mail(_) | AuthError::Internal(_) => {
                error!(error = ?err, "request failed");
                Self::new(StatusCode::BAD_REQUEST, fallback)
            }
        }
    }

    /// A body that is not the expected JSON gets the endpoint's message.
    pub fn from_body(rejection: JsonRejection, fallback: &str) -> Self {
        warn!(error = %rejection.body_text(), "request body rejected");
        Self::new(StatusCode::BAD_REQUEST, fallback)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = Json(json!({
            "statusCode": self.status.as_u16(),
            "message": self.message,
            "error": self.status.canonical_reason().unwrap_or("Error"),
        }));
        (self.status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
