//! Signed Tokens
//!
//! HS256 JWTs carrying an arbitrary serde payload plus `iat`/`exp`.
//! One [`TokenSigner`] owns one secret and one lifetime; callers that need
//! several token kinds (access, refresh) hold several signers.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("Token encoding failed: {0}")]
    Encoding(String),

    #[error("Token expired")]
    Expired,

    #[error("Invalid token")]
    Invalid,
}

impl From<jsonwebtoken::errors::Error> for TokenError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => TokenError::Expired,
            _ => TokenError::Invalid,
        }
    }
}

/// Payload with issue/expiry timestamps (seconds since epoch)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedClaims<T> {
    #[serde(flatten)]
    pub payload: T,
    pub iat: i64,
    pub exp: i64,
}

/// Freshly signed token
#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

/// Signs and verifies tokens with a single HMAC secret
#[derive(Clone)]
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenSigner {
    /// `ttl` may be negative, which yields already-expired tokens.
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn sign<T: Serialize>(&self, payload: T) -> Result<IssuedToken, TokenError> {
        self.sign_at(payload, Utc::now())
    }

    /// Sign as if issued at `now`
    pub fn sign_at<T: Serialize>(
        &self,
        payload: T,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, TokenError> {
        let expires_at = now + self.ttl;
        let claims = SignedClaims {
            payload,
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| TokenError::Encoding(e.to_string()))?;

        Ok(IssuedToken { token, expires_at })
    }

    /// Check signature and expiry, then decode
    pub fn verify<T: DeserializeOwned>(&self, token: &str) -> Result<SignedClaims<T>, TokenError> {
        let mut validation = Validation::default();
        // Strict expiry: a token is dead the second `exp` passes
        validation.leeway = 0;

        let data = decode::<SignedClaims<T>>(token, &self.decoding_key, &validation)?;
        Ok(data.claims)
    }
}

impl std::fmt::Debug for TokenSigner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSigner")
            .field("key", &"[REDACTED]")
            .field("ttl", &self.ttl)
            .finish()
    }
}
