//! Token Claims
//!
//! Identity embedded in both access and refresh tokens. Serialized flat
//! next to `iat`/`exp`, so the wire payload is `{id, email, iat, exp}`.

use platform::token::SignedClaims;
use serde::{Deserialize, Serialize};

use crate::domain::entity::user::User;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    pub id: String,
    pub email: String,
}

impl TokenClaims {
    pub fn for_user(user: &User) -> Self {
        Self {
            id: user.user_id.to_string(),
            email: user.email.to_string(),
        }
    }
}

/// Decoded and verified access token, attached to requests by the guard
pub type AuthenticatedUser = SignedClaims<TokenClaims>;
