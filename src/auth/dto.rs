use serde::{Deserialize, Serialize};

pub const TOKEN_TYPE: &str = "bearer";

/// Bearer credential returned by login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Token {
    pub access_token: String,
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
        }
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for registration.
#[derive(Debug, Deserialize)]
pub struct UserCreate {
    pub username: String,
    #[serde(rename = "firstName")]
    pub first_name: String,
    #[serde(rename = "lastName")]
    pub last_name: String,
    pub email: String,
    #[serde(rename = "passwd")]
    pub password: String,
    #[serde(rename = "passwConfirmation")]
    pub password_confirmation: String,
}
