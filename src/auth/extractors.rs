use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{header, request::Parts},
};

use crate::{
    auth::{
        jwt::JwtKeys,
        services::{get_current_active_user, get_current_user},
    },
    error::{AppError, CREDENTIALS_INVALID},
    state::AppState,
    users::repo_types::User,
};

pub const SESSION_COOKIE: &str = "session";

/// Bearer token carried by the request: `Authorization` header first,
/// then the `session` cookie set at login.
#[derive(Debug, Clone)]
pub struct SessionData {
    pub token: String,
}

#[async_trait]
impl<S> FromRequestParts<S> for SessionData
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        bearer_token(parts)
            .or_else(|| session_cookie(parts))
            .map(|token| SessionData { token })
            .ok_or(AppError::AuthenticationFailed(CREDENTIALS_INVALID))
    }
}

fn bearer_token(parts: &Parts) -> Option<String> {
    let auth = parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|h| h.to_str().ok())?;
    auth.strip_prefix("Bearer ")
        .or_else(|| auth.strip_prefix("bearer "))
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
}

fn session_cookie(parts: &Parts) -> Option<String> {
    parts
        .headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|h| h.to_str().ok())
        .flat_map(|h| h.split(';'))
        .find_map(|pair| {
            let (name, value) = pair.trim().split_once('=')?;
            (name == SESSION_COOKIE && !value.is_empty()).then(|| value.to_string())
        })
}

/// The user named by a valid session token, active or not.
pub struct CurrentUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let session = SessionData::from_request_parts(parts, state).await?;
        let keys = JwtKeys::from_ref(state);
        get_current_user(state.store.as_ref(), &keys, &session)
            .await
            .map(CurrentUser)
    }
}

/// `CurrentUser` gated on the active flag.
pub struct ActiveUser(pub User);

#[async_trait]
impl FromRequestParts<AppState> for ActiveUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let CurrentUser(user) = CurrentUser::from_request_parts(parts, state).await?;
        get_current_active_user(user).map(ActiveUser)
    }
}
