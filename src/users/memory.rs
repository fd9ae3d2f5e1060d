use std::{collections::HashMap, sync::Mutex};

use async_trait::async_trait;
use time::OffsetDateTime;
use uuid::Uuid;

use crate::users::{
    repo::{InsertError, UserStore},
    repo_types::{NewUser, User},
};

/// Map-backed store for unit and router tests.
#[derive(Default)]
pub struct MemoryUserStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryUserStore {
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let store = Self::default();
        {
            let mut map = store.users.lock().unwrap();
            for u in users {
                map.insert(u.username.clone(), u);
            }
        }
        store
    }

    pub fn set_active(&self, username: &str, active: bool) {
        if let Some(u) = self.users.lock().unwrap().get_mut(username) {
            u.is_active = active;
        }
    }
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn find_by_username(&self, username: &str) -> anyhow::Result<Option<User>> {
        Ok(self.users.lock().unwrap().get(username).cloned())
    }

    async fn insert(&self, user: NewUser) -> Result<User, InsertError> {
        let mut map = self.users.lock().unwrap();
        if map.contains_key(&user.username) {
            return Err(InsertError::UsernameTaken(user.username));
        }
        let stored = User {
            id: Uuid::new_v4(),
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            email: user.email,
            hashed_password: user.hashed_password,
            bookmarks: None,
            is_active: true,
            created_at: OffsetDateTime::now_utc(),
        };
        map.insert(stored.username.clone(), stored.clone());
        Ok(stored)
    }
}

/// Builds a stored user whose hash matches `password`.
pub fn sample_user(username: &str, password: &str, active: bool) -> User {
    User {
        id: Uuid::new_v4(),
        username: username.to_string(),
        first_name: "Test".into(),
        last_name: "User".into(),
        email: format!("{username}@example.com"),
        hashed_password: crate::auth::password::hash_password(password).unwrap(),
        bookmarks: None,
        is_active: active,
        created_at: OffsetDateTime::now_utc(),
    }
}
