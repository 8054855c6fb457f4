//! Password Hashing and Verification
//!
//! bcrypt with a configurable cost factor. Clear text is zeroized on drop
//! and redacted from `Debug`. Hashing is CPU-bound, so the async helpers
//! move the work onto tokio's blocking pool.

use std::fmt;

use thiserror::Error;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Cost used when the configuration does not say otherwise
pub const DEFAULT_COST: u32 = 10;

/// Lowest cost bcrypt accepts
pub const MIN_COST: u32 = 4;

/// Highest cost bcrypt accepts
pub const MAX_COST: u32 = 31;

/// bcrypt only looks at the first 72 bytes; longer input is refused
/// instead of being silently truncated.
pub const MAX_PASSWORD_BYTES: usize = 72;

// ============================================================================
// Error Types
// ============================================================================

/// Input rejected before hashing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PasswordPolicyError {
    #[error("Password cannot be empty")]
    Empty,

    #[error("Password must be at most {max} bytes (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// Hashing/verification failures
#[derive(Debug, Error)]
pub enum PasswordHashError {
    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Invalid password hash format")]
    InvalidHashFormat,

    #[error("Invalid bcrypt cost {0} (expected {MIN_COST}..={MAX_COST})")]
    InvalidCost(u32),

    #[error("Password hashing task failed: {0}")]
    TaskFailed(String),
}

// ============================================================================
// Clear Text Password
// ============================================================================

/// Clear text password, zeroized on drop
///
/// Deliberately not `Clone`.
#[derive(Zeroize, ZeroizeOnDrop)]
pub struct ClearTextPassword(String);

impl ClearTextPassword {
    pub fn new(raw: String) -> Result<Self, PasswordPolicyError> {
        if raw.is_empty() {
            return Err(PasswordPolicyError::Empty);
        }

        if raw.len() > MAX_PASSWORD_BYTES {
            return Err(PasswordPolicyError::TooLong {
                max: MAX_PASSWORD_BYTES,
                actual: raw.len(),
            });
        }

        Ok(Self(raw))
    }

    pub(crate) fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }

    /// Hash with bcrypt at `cost`
    pub fn hash(&self, cost: u32) -> Result<HashedPassword, PasswordHashError> {
        if !(MIN_COST..=MAX_COST).contains(&cost) {
            return Err(PasswordHashError::InvalidCost(cost));
        }

        let hash = bcrypt::hash(self.as_bytes(), cost)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))?;

        Ok(HashedPassword { hash })
    }
}

impl fmt::Debug for ClearTextPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ClearTextPassword")
            .field(&"[REDACTED]")
            .finish()
    }
}

// ============================================================================
// Hashed Password
// ============================================================================

/// bcrypt hash string (`$2b$10$...`), safe to store
#[derive(Clone, PartialEq, Eq)]
pub struct HashedPassword {
    hash: String,
}

impl HashedPassword {
    /// Wrap a stored hash after a structural check
    pub fn from_hash_string(hash: impl Into<String>) -> Result<Self, PasswordHashError> {
        let hash = hash.into();
        // $2?$cc$ + 53 chars of salt and digest
        let well_formed = hash.len() == 60
            && hash.starts_with("$2")
            && hash.as_bytes().get(3) == Some(&b'$')
            && hash.as_bytes().get(6) == Some(&b'$');

        if !well_formed {
            return Err(PasswordHashError::InvalidHashFormat);
        }

        Ok(Self { hash })
    }

    pub fn as_str(&self) -> &str {
        &self.hash
    }

    /// Cost factor encoded in the hash
    pub fn cost(&self) -> Option<u32> {
        self.hash.get(4..6).and_then(|c| c.parse().ok())
    }

    /// Check a candidate password; `Ok(false)` on mismatch
    pub fn verify(&self, password: &ClearTextPassword) -> Result<bool, PasswordHashError> {
        bcrypt::verify(password.as_bytes(), &self.hash)
            .map_err(|e| PasswordHashError::HashingFailed(e.to_string()))
    }
}

impl fmt::Debug for HashedPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HashedPassword")
            .field("hash", &"[HASH]")
            .finish()
    }
}

// ============================================================================
// Async helpers
// ============================================================================

/// Hash on the blocking pool
pub async fn hash_password(
    password: ClearTextPassword,
    cost: u32,
) -> Result<HashedPassword, PasswordHashError> {
    tokio::task::spawn_blocking(move || password.hash(cost))
        .await
        .map_err(|e| PasswordHashError::TaskFailed(e.to_string()))?
}

/// Verify on the blocking pool
pub async fn verify_password(
    password: ClearTextPassword,
    hashed: HashedPassword,
) -> Result<bool, PasswordHashError> {
    tokio::task::spawn_blocking(move || hashed.verify(&password))
        .await
        .map_err(|e| PasswordHashError::TaskFailed(e.to_string()))?
}
