use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use tracing::instrument;

use crate::{
    auth::{
        dto::{MessageResponse, RegisterRequest, UpdateUserRequest, VerifyRequest, VerifyResponse},
        extractors::AdminAuth,
        repo_types::PublicUser,
        services,
    },
    errors::{ApiError, ApiResult},
    state::AppState,
};

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/verify", post(verify))
        .route("/auth/user/:id", get(get_user).put(update_user))
}

pub fn data_routes() -> Router<AppState> {
    Router::new().route("/api/data", get(list_users))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<MessageResponse>)> {
    let Json(payload) = payload.map_err(|e| ApiError::from_body(e, "Registration failed"))?;
    services::register(&state, payload)
        .await
        .map_err(|e| ApiError::from_auth(e, "Registration failed"))?;

    Ok((
        StatusCode::CREATED,
        Json(MessageResponse {
            message: "User registered successfully. Please check your email to verify your account."
                .into(),
        }),
    ))
}

#[instrument(skip(state, payload))]
pub async fn verify(
    State(state): State<AppState>,
    payload: Result<Json<VerifyRequest>, JsonRejection>,
) -> ApiResult<Json<VerifyResponse>> {
    let Json(payload) = payload.map_err(|e| ApiError::from_body(e, "Invalid or expired token"))?;
    let user = services::verify_email(&state, payload)
        .await
        .map_err(|e| ApiError::from_auth(e, "Invalid or expired token"))?;

    Ok(Json(VerifyResponse {
        message: "Email verified successfully.".into(),
        user,
    }))
}

#[instrument(skip(state))]
pub async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PublicUser>> {
    let user = services::get_user(&state, &id)
        .await
        .map_err(|e| ApiError::from_auth(e, "Failed to fetch user data"))?;
    Ok(Json(user))
}

#[instrument(skip(state, payload))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<UpdateUserRequest>, JsonRejection>,
) -> ApiResult<Json<PublicUser>> {
    let Json(payload) = payload.map_err(|e| ApiError::from_body(e, "Failed to update user"))?;
    let user = services::update_user(&state, &id, payload)
        .await
        .map_err(|e| ApiError::from_auth(e, "Failed to update user"))?;
    Ok(Json(user))
}

#[instrument(skip(state, _admin))]
pub async fn list_users(
    State(state): State<AppState>,
    _admin: AdminAuth,
) -> ApiResult<Json<Vec<PublicUser>>> {
    let users = services::list_users(&state)
        .await
        .map_err(|e| ApiError::from_auth(e, "Failed to fetch users"))?;
    Ok(Json(users))
}
