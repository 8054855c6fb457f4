//! Logout Use Case
//!
//! Revokes the caller's refresh token.

use std::sync::Arc;

use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Logout use case
pub struct LogoutUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
}

impl<U> LogoutUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>) -> Self {
        Self { user_repo }
    }

    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<()> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::LogoutTokenRequired)?;

        let mut user = self
            .user_repo
            .find_by_refresh_token(token)
            .await?
            .ok_or(AuthError::LogoutTokenUnknown)?;

        user.set_refresh_token(None);
        self.user_repo.update_refresh_token(&user).await?;

        tracing::info!(user_id = %user.user_id, "User logged out");
        Ok(())
    }
}
