use axum::extract::FromRef;
use lazy_static::lazy_static;
use lettre::Address;
use regex::Regex;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::{
    auth::{
        dto::{RegisterRequest, UpdateUserRequest, VerifyRequest},
        errors::AuthError,
        jwt::VerificationKeys,
        password::hash_password_async,
        repo_types::{NewUser, ProfileChanges, PublicUser},
    },
    mail::verification_email,
    state::AppState,
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    // Recipients must also parse for the mailer.
    EMAIL_RE.is_match(email) && email.parse::<Address>().is_ok()
}

fn validate_registration(email: &str, password: &str) -> Result<(), AuthError> {
    if email.is_empty() {
        return Err(AuthError::Validation("Email is required".into()));
    }
    if !is_valid_email(email) {
        return Err(AuthError::Validation("Invalid email".into()));
    }
    if password.is_empty() {
        return Err(AuthError::Validation("Password is required".into()));
    }
    Ok(())
}

/// Malformed ids cannot name a stored user.
fn parse_user_id(id: &str) -> Result<Uuid, AuthError> {
    Uuid::parse_str(id).map_err(|_| AuthError::UserNotFound)
}

/// Creates an unverified user and mails them a verification link.
///
/// The existence check is only a fast path; the store's uniqueness
/// constraint decides concurrent registrations, and the loser gets the same
/// `DuplicateUser` error. The record stays in place when the mail cannot be
/// sent.
pub async fn register(state: &AppState, req: RegisterRequest) -> Result<(), AuthError> {
    let email = req.email.trim().to_lowercase();
    validate_registration(&email, &req.password)?;

    if state.users.find_by_email(&email).await?.is_some() {
        warn!(email = %email, "email already registered");
        return Err(AuthError::DuplicateUser);
    }

    let password_hash = hash_password_async(req.password).await?;

    let keys = VerificationKeys::from_ref(state);
    let token = keys.sign(&email)?;

    let user = state
        .users
        .create(NewUser {
            email,
            password_hash,
            verification_token: token.clone(),
        })
        .await
        .map_err(|e| {
            let e = AuthError::from(e);
            if matches!(e, AuthError::DuplicateUser) {
                warn!("email registered concurrently");
            }
            e
        })?;

    let link = state.config.verification_link(&token);
    state
        .mailer
        .send(verification_email(&user.email, &link))
        .await
        .map_err(|e| {
            error!(error = %e, user_id = %user.id, "verification email failed");
            AuthError::Mail(e)
        })?;

    info!(user_id = %user.id, email = %user.email, "user registered");
    Ok(())
}

/// Marks the user bound by a valid token as verified. Trusts the signature
/// alone; the stored token is not compared.
pub async fn verify_email(state: &AppState, req: VerifyRequest) -> Result<PublicUser, AuthError> {
    let token = req.token.trim();
    if token.is_empty() {
        return Err(AuthError::InvalidToken);
    }

    let claims = VerificationKeys::from_ref(state).verify(token)?;

    let user = state
        .users
        .mark_verified(&claims.email)
        .await?
        .ok_or_else(|| {
            warn!(email = %claims.email, "token for unknown user");
            AuthError::UserNotFound
        })?;

    info!(user_id = %user.id, "email verified");
    Ok(user.into())
}

pub async fn get_user(state: &AppState, id: &str) -> Result<PublicUser, AuthError> {
    let id = parse_user_id(id)?;
    let user = state
        .users
        .find_by_id(id)
        .await?
        .ok_or(AuthError::UserNotFound)?;
    Ok(user.into())
}

/// Overwrites the supplied profile fields; absent fields keep their value.
pub async fn update_user(
    state: &AppState,
    id: &str,
    req: UpdateUserRequest,
) -> Result<PublicUser, AuthError> {
    let id = parse_user_id(id)?;
    let changes = ProfileChanges {
        name: req.name,
        profile_image: req.profile_image,
    };
    let user = state
        .users
        .update_profile(id, changes)
        .await?
        .ok_or(AuthError::UserNotFound)?;

    info!(user_id = %user.id, "profile updated");
    Ok(user.into())
}

pub async fn list_users(state: &AppState) -> Result<Vec<PublicUser>, AuthError> {
    let users = state.users.list().await?;
    Ok(users.into_iter().map(PublicUser::from).collect())
}
