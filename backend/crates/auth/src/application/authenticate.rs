//! Authenticate Use Case
//!
//! Turns an `Authorization` header value into a verified identity.

use std::sync::Arc;

use crate::application::tokens::TokenIssuer;
use crate::domain::entity::claims::AuthenticatedUser;
use crate::error::{AuthError, AuthResult};

const BEARER_PREFIX: &str = "Bearer ";

/// Authenticate use case
pub struct AuthenticateUseCase {
    tokens: Arc<TokenIssuer>,
}

impl AuthenticateUseCase {
    pub fn new(tokens: Arc<TokenIssuer>) -> Self {
        Self { tokens }
    }

    /// Accepts `Bearer <token>` or the bare token
    pub fn execute(&self, authorization: Option<&str>) -> AuthResult<AuthenticatedUser> {
        let token = authorization
            .map(str::trim_start)
            .map(|value| value.strip_prefix(BEARER_PREFIX).unwrap_or(value).trim())
            .filter(|token| !token.is_empty())
            .ok_or(AuthError::AccessTokenMissing)?;

        self.tokens
            .verify_access(token)
            .map_err(|_| AuthError::AccessTokenInvalid)
    }
}
