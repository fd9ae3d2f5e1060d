use axum::{
    extract::{FromRef, State},
    http::{header, StatusCode},
    routing::post,
    Json, Router,
};
use lazy_static::lazy_static;
use regex::Regex;
use tracing::{info, instrument, warn};

use crate::{
    auth::{
        dto::{LoginRequest, Token, UserCreate},
        extractors::SESSION_COOKIE,
        jwt::JwtKeys,
        password::hash_password,
        services::{authenticate_user, get_user},
    },
    error::AppError,
    state::AppState,
    users::repo_types::{NewUser, User},
};

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
}

#[instrument(skip(state, payload))]
pub async fn register(
    State(state): State<AppState>,
    Json(mut payload): Json<UserCreate>,
) -> Result<(StatusCode, Json<User>), AppError> {
    payload.username = payload.username.trim().to_string();
    payload.email = payload.email.trim().to_lowercase();

    if payload.username.is_empty() {
        return Err(AppError::BadRequest("Username is required".into()));
    }

    if !is_valid_email(&payload.email) {
        warn!(email = %payload.email, "invalid email");
        return Err(AppError::BadRequest("Invalid email".into()));
    }

    if payload.password.len() < 8 {
        warn!("password too short");
        return Err(AppError::BadRequest("Password too short".into()));
    }

    if payload.password != payload.password_confirmation {
        return Err(AppError::BadRequest("Passwords do not match".into()));
    }

    if get_user(state.store.as_ref(), &payload.username).await?.is_some() {
        warn!(username = %payload.username, "username already registered");
        return Err(AppError::Conflict("Username already registered".into()));
    }

    let hashed_password = hash_password(&payload.password)?;
    let user = state
        .store
        .insert(NewUser {
            username: payload.username,
            first_name: payload.first_name,
            last_name: payload.last_name,
            email: payload.email,
            hashed_password,
        })
        .await?;

    info!(user_id = %user.id, username = %user.username, "user registered");
    Ok((StatusCode::CREATED, Json(user)))
}

#[instrument(skip(state, payload))]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<([(header::HeaderName, String); 1], Json<Token>), AppError> {
    let user = authenticate_user(state.store.as_ref(), &payload.username, &payload.password).await?;

    let keys = JwtKeys::from_ref(&state);
    let access_token = keys.sign(&user.username)?;
    let cookie = format!("{SESSION_COOKIE}={access_token}; HttpOnly; Path=/; SameSite=Lax");

    info!(user_id = %user.id, username = %user.username, "user logged in");
    Ok((
        [(header::SET_COOKIE, cookie)],
        Json(Token::bearer(access_token)),
    ))
}
