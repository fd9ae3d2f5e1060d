use anyhow::Context;
use async_trait::async_trait;
use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::users::repo_types::{NewUser, User, UserRow};

#[derive(Debug, Error)]
pub enum InsertError {
    #[error("username {0:?} is already taken")]
    UsernameTaken(String),
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Lookup and insert over the stored user records.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>>;
    async fn insert(&self, user: NewUser) -> Result<User, InsertError>;
}

#[derive(Clone)]
pub struct PgUserStore {
    db: PgPool,
}

impl PgUserStore {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserStore for PgUserStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT id, username, first_name, last_name, email, hashed_password,
                   bookmarks, is_active, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.db)
        .await
        .context("select user by username")?;
        Ok(row.map(User::from))
    }

    async fn insert(&self, user: NewUser) -> Result<User, InsertError> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (id, username, first_name, last_name, email, hashed_password)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, username, first_name, last_name, email, hashed_password,
                      bookmarks, is_active, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .bind(&user.hashed_password)
        .fetch_one(&self.db)
        .await
        .map_err(|e| match e {
            // unique index on username; lost a race with another registration
            sqlx::Error::Database(db) if db.is_unique_violation() => {
                InsertError::UsernameTaken(user.username.clone())
            }
            other => InsertError::Other(anyhow::Error::new(other).context("insert user")),
        })?;
        Ok(row.into())
    }
}
