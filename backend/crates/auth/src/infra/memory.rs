//! In-Memory Repository Implementation
//!
//! Same contract as the Postgres store, kept in a process-local map. Used by
//! tests and for running the service without a database.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_id::UserId};
use crate::error::{AuthError, AuthResult};

/// Clones share the same underlying map
#[derive(Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

impl UserRepository for MemoryUserRepository {
    async fn create(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        if users.values().any(|u| u.email == user.email) {
            return Err(AuthError::EmailTaken);
        }

        users.insert(user.user_id, user.clone());
        Ok(())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| &u.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        let users = self.users.read().await;
        Ok(users.values().any(|u| &u.email == email))
    }

    async fn find_by_refresh_token(&self, token: &str) -> AuthResult<Option<User>> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.holds_refresh_token(token)).cloned())
    }

    async fn update_refresh_token(&self, user: &User) -> AuthResult<()> {
        let mut users = self.users.write().await;

        let stored = users.get_mut(&user.user_id).ok_or_else(|| {
            AuthError::Internal(format!(
                "User {} vanished during refresh token update",
                user.user_id
            ))
        })?;
        stored.refresh_token = user.refresh_token.clone();
        stored.updated_at = user.updated_at;
        Ok(())
    }
}
