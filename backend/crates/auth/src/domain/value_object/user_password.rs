//! User Password Value Objects
//!
//! [`RawPassword`] is what the client typed; [`UserPassword`] is the bcrypt
//! hash that gets stored. Cryptography lives in `platform::password`; this
//! module only translates its errors into client-facing messages.

use kernel::error::app_error::{AppError, AppResult};
use platform::password::{
    self, ClearTextPassword, HashedPassword, PasswordHashError, PasswordPolicyError,
};
use std::fmt;

// ============================================================================
// Raw Password (User Input)
// ============================================================================

/// Password as received, zeroized when dropped
pub struct RawPassword(ClearTextPassword);

impl RawPassword {
    pub fn new(raw: String) -> AppResult<Self> {
        let clear_text = ClearTextPassword::new(raw).map_err(|e| match e {
            PasswordPolicyError::Empty => AppError::bad_request("Password cannot be empty"),
            PasswordPolicyError::TooLong { max, .. } => AppError::bad_request(format!(
                "Password must be at most {} bytes",
                max
            )),
        })?;

        Ok(Self(clear_text))
    }

    pub(crate) fn into_inner(self) -> ClearTextPassword {
        self.0
    }
}

impl fmt::Debug for RawPassword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RawPassword").field(&"[REDACTED]").finish()
    }
}

// ============================================================================
// User Password (Stored Hash)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserPassword(HashedPassword);

impl UserPassword {
    /// Hash `raw` at `cost` on the blocking pool
    pub async fn hash(raw: RawPassword, cost: u32) -> Result<Self, PasswordHashError> {
        let hashed = password::hash_password(raw.into_inner(), cost).await?;
        Ok(Self(hashed))
    }

    /// Restore a stored hash
    pub fn from_db(hash: impl Into<String>) -> Result<Self, PasswordHashError> {
        HashedPassword::from_hash_string(hash).map(Self)
    }

    /// Compare a candidate on the blocking pool
    pub async fn verify(&self, candidate: RawPassword) -> Result<bool, PasswordHashError> {
        password::verify_password(candidate.into_inner(), self.0.clone()).await
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform::password::MIN_COST;

    fn raw(s: &str) -> RawPassword {
        RawPassword::new(s.to_string()).unwrap()
    }

    #[test]
    fn test_raw_password_policy() {
        assert!(RawPassword::new("pw123".to_string()).is_ok());

        let empty = RawPassword::new(String::new()).unwrap_err();
        assert_eq!(empty.message(), "Password cannot be empty");

        let long = RawPassword::new("x".repeat(73)).unwrap_err();
        assert_eq!(long.status_code(), 400);
    }

    #[test]
    fn test_raw_password_debug_redacted() {
        assert!(!format!("{:?}", raw("hunter2")).contains("hunter2"));
    }

    #[tokio::test]
    async fn test_hash_then_verify() {
        let stored = UserPassword::hash(raw("pw123"), MIN_COST).await.unwrap();
        assert_ne!(stored.as_str(), "pw123");

        assert!(stored.verify(raw("pw123")).await.unwrap());
        assert!(!stored.verify(raw("pw1234")).await.unwrap());
    }

    #[tokio::test]
    async fn test_from_db() {
        let stored = UserPassword::hash(raw("pw123"), MIN_COST).await.unwrap();
        let restored = UserPassword::from_db(stored.as_str()).unwrap();
        assert!(restored.verify(raw("pw123")).await.unwrap());

        assert!(UserPassword::from_db("pw123").is_err());
    }
}
