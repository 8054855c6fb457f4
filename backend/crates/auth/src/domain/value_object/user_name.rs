//! User Name Value Object
//!
//! Display name given at registration. Not an identifier: two users may
//! share one. Input is NFKC-normalized and trimmed before validation, so
//! full-width and compatibility forms collapse to their canonical shape.

use kernel::error::app_error::{AppError, AppResult};
use std::fmt;
use unicode_normalization::UnicodeNormalization;

/// Minimum length (in characters, after normalization)
pub const USER_NAME_MIN_LENGTH: usize = 1;

/// Maximum length (in characters, after normalization)
pub const USER_NAME_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserName(String);

impl UserName {
    pub fn new(raw: impl AsRef<str>) -> AppResult<Self> {
        let normalized: String = raw.as_ref().nfkc().collect();
        let name = normalized.trim();

        let length = name.chars().count();
        if length < USER_NAME_MIN_LENGTH {
            return Err(AppError::bad_request("Username cannot be empty"));
        }
        if length > USER_NAME_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Username must be at most {} characters",
                USER_NAME_MAX_LENGTH
            )));
        }

        if name.chars().any(char::is_control) {
            return Err(AppError::bad_request(
                "Username cannot contain control characters",
            ));
        }

        Ok(Self(name.to_string()))
    }

    /// Wrap a value read back from the store
    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UserName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
