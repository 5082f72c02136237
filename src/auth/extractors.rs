use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, StatusCode},
};
use tracing::warn;

use crate::{errors::ApiError, state::AppState};

/// Admits requests carrying `Authorization: Bearer <ADMIN_TOKEN>`.
pub struct AdminAuth;

fn tokens_match(given: &[u8], expected: &[u8]) -> bool {
    given.len() == expected.len()
        && given
            .iter()
            .zip(expected)
            .fold(0u8, |acc, (a, b)| acc | (a ^ b))
            == 0
}

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let expected = state.config.admin_token.as_deref().ok_or_else(|| {
            warn!("admin endpoint called but ADMIN_TOKEN is not configured");
            ApiError::new(StatusCode::FORBIDDEN, "Forbidden")
        })?;

        let auth = parts
            .headers
            .get(axum::http::header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized"))?;

        // Expect "Bearer <token>"
        let token = auth
            .strip_prefix("Bearer ")
            .or_else(|| auth.strip_prefix("bearer "))
            .ok_or_else(|| ApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized"))?;

        if !tokens_match(token.as_bytes(), expected.as_bytes()) {
            warn!("invalid admin token");
            return Err(ApiError::new(StatusCode::UNAUTHORIZED, "Unauthorized"));
        }

        Ok(AdminAuth)
    }
}
