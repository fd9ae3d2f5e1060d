use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::{auth::password::PasswordError, users::repo::InsertError};

pub const CREDENTIALS_INVALID: &str = "Could not validate credentials";
pub const LOGIN_INVALID: &str = "Incorrect username or password";

#[derive(Debug, Error)]
pub enum AppError {
    /// 401 with a `WWW-Authenticate: Bearer` challenge.
    #[error("{0}")]
    AuthenticationFailed(&'static str),
    #[error("Inactive user")]
    InactiveUser,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Conflict(String),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::AuthenticationFailed(_) => StatusCode::UNAUTHORIZED,
            AppError::InactiveUser | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<PasswordError> for AppError {
    fn from(e: PasswordError) -> Self {
        AppError::Internal(e.into())
    }
}

impl From<InsertError> for AppError {
    fn from(e: InsertError) -> Self {
        match e {
            InsertError::UsernameTaken(_) => {
                AppError::Conflict("Username already registered".into())
            }
            InsertError::Other(e) => AppError::Internal(e),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            AppError::Internal(e) => {
                error!(error = %e, "internal error");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };
        let body = Json(json!({ "detail": detail }));

        if let AppError::AuthenticationFailed(_) = self {
            (status, [(header::WWW_AUTHENTICATE, "Bearer")], body).into_response()
        } else {
            (status, body).into_response()
        }
    }
}
