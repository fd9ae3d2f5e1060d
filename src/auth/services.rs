use tracing::{debug, info, warn};

use crate::{
    auth::{extractors::SessionData, jwt::JwtKeys, password::verify_password},
    error::{AppError, CREDENTIALS_INVALID, LOGIN_INVALID},
    users::{repo::UserStore, repo_types::User},
};

pub async fn get_user(store: &dyn UserStore, username: &str) -> anyhow::Result<Option<User>> {
    store.find_by_username(username).await
}

/// Unknown username and wrong password fail the same way.
pub async fn authenticate_user(
    store: &dyn UserStore,
    username: &str,
    password: &str,
) -> Result<User, AppError> {
    let Some(user) = get_user(store, username).await? else {
        warn!(%username, "login unknown username");
        return Err(AppError::AuthenticationFailed(LOGIN_INVALID));
    };

    if !verify_password(password, &user.hashed_password)?.is_match() {
        warn!(%username, user_id = %user.id, "login invalid password");
        return Err(AppError::AuthenticationFailed(LOGIN_INVALID));
    }

    Ok(user)
}

pub async fn get_current_user(
    store: &dyn UserStore,
    keys: &JwtKeys,
    session: &SessionData,
) -> Result<User, AppError> {
    let token_data = keys.decode(&session.token).map_err(|e| {
        debug!(error = %e, "token rejected");
        AppError::AuthenticationFailed(CREDENTIALS_INVALID)
    })?;

    let Some(username) = token_data.username else {
        debug!("token has no subject");
        return Err(AppError::AuthenticationFailed(CREDENTIALS_INVALID));
    };

    match get_user(store, &username).await? {
        Some(user) => Ok(user),
        None => {
            warn!(%username, "token subject not found");
            Err(AppError::AuthenticationFailed(CREDENTIALS_INVALID))
        }
    }
}

pub fn get_current_active_user(user: User) -> Result<User, AppError> {
    if !user.is_active {
        info!(username = %user.username, "inactive user rejected");
        return Err(AppError::InactiveUser);
    }
    Ok(user)
}
