//! In-memory Users Repository

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::users::models::User;

use super::UsersRepository;

/// `HashMap`-backed users keyed by email, for tests and local development.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUsersRepository {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryUsersRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a user.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.email.clone(), user);
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, sqlx::Error> {
        Ok(self.users.read().await.get(email).cloned())
    }
}
