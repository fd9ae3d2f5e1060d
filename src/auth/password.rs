use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use thiserror::Error;
use tracing::error;

/// Outcome of checking a submitted password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Match,
    Mismatch,
}

impl PasswordCheck {
    pub fn is_match(self) -> bool {
        self == PasswordCheck::Match
    }
}

/// Failures of the hashing library itself, never a wrong password.
#[derive(Debug, Error)]
pub enum PasswordError {
    #[error("stored password hash is not a PHC string: {0}")]
    CorruptHash(password_hash::Error),
    #[error("argon2 failed: {0}")]
    Argon2(password_hash::Error),
}

pub fn hash_password(plain: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| {
            error!(error = %e, "argon2 hash failed");
            PasswordError::Argon2(e)
        })
}

pub fn verify_password(plain: &str, hashed: &str) -> Result<PasswordCheck, PasswordError> {
    let parsed = PasswordHash::new(hashed).map_err(|e| {
        error!(error = %e, "stored hash unreadable");
        PasswordError::CorruptHash(e)
    })?;
    match Argon2::default().verify_password(plain.as_bytes(), &parsed) {
        Ok(()) => Ok(PasswordCheck::Match),
        Err(password_hash::Error::Password) => Ok(PasswordCheck::Mismatch),
        Err(e) => {
            error!(error = %e, "argon2 verify failed");
            Err(PasswordError::Argon2(e))
        }
    }
}
