//! Refresh Token Use Case
//!
//! Mints a new access token from a stored refresh token. The refresh token
//! itself is left in place.

use std::sync::Arc;

use crate::application::tokens::TokenIssuer;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};

/// Refresh output
#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub access_token: String,
}

/// Refresh token use case
pub struct RefreshTokenUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenIssuer>,
}

impl<U> RefreshTokenUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenIssuer>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, refresh_token: Option<&str>) -> AuthResult<RefreshTokenOutput> {
        let token = refresh_token
            .filter(|t| !t.is_empty())
            .ok_or(AuthError::RefreshTokenRequired)?;

        // Store match first: a revoked token is unknown even while its
        // signature is still good.
        let holder = self
            .user_repo
            .find_by_refresh_token(token)
            .await?
            .ok_or(AuthError::RefreshTokenUnknown)?;

        let claims = self
            .tokens
            .verify_refresh(token)
            .map_err(|_| AuthError::RefreshTokenInvalid)?;

        let access = self.tokens.issue_access(&claims.payload)?;

        tracing::info!(user_id = %holder.user_id, "Access token refreshed");

        Ok(RefreshTokenOutput {
            access_token: access.token,
        })
    }
}
