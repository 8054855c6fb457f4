//! Token Issuer
//!
//! Pairs an access-token signer with a refresh-token signer. The two use
//! different secrets, so a refresh token never passes as an access token
//! and vice versa.

use platform::token::{IssuedToken, TokenError, TokenSigner};

use crate::application::config::AuthConfig;
use crate::domain::entity::claims::{AuthenticatedUser, TokenClaims};

#[derive(Debug, Clone)]
pub struct TokenIssuer {
    access: TokenSigner,
    refresh: TokenSigner,
}

impl TokenIssuer {
    pub fn new(access: TokenSigner, refresh: TokenSigner) -> Self {
        Self { access, refresh }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            TokenSigner::new(&config.access_token_secret, config.access_token_ttl),
            TokenSigner::new(&config.refresh_token_secret, config.refresh_token_ttl),
        )
    }

    pub fn issue_access(&self, claims: &TokenClaims) -> Result<IssuedToken, TokenError> {
        self.access.sign(claims)
    }

    pub fn issue_refresh(&self, claims: &TokenClaims) -> Result<IssuedToken, TokenError> {
        self.refresh.sign(claims)
    }

    pub fn verify_access(&self, token: &str) -> Result<AuthenticatedUser, TokenError> {
        self.access.verify(token)
    }

    pub fn verify_refresh(&self, token: &str) -> Result<AuthenticatedUser, TokenError> {
        self.refresh.verify(token)
    }
}
