//! Auth Error Types
//!
//! Auth-specific failures. Each variant carries its client-facing message
//! and maps onto the unified `kernel::error::AppError`.

use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::password::{PasswordHashError, PasswordPolicyError};
use platform::token::TokenError;
use thiserror::Error;

/// Auth-specific result type alias
pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    /// Registration with an email that is already on file
    #[error("User already exists")]
    EmailTaken,

    /// Login with an unknown email
    #[error("User not found")]
    UserNotFound,

    /// Login with the wrong password
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Protected route without an access token
    #[error("Access denied. No token provided.")]
    AccessTokenMissing,

    /// Access token malformed, signed by another key, or expired
    #[error("Invalid or expired token")]
    AccessTokenInvalid,

    /// Refresh request without a refresh token
    #[error("Refresh token required")]
    RefreshTokenRequired,

    /// Refresh token not held by any user
    #[error("Invalid refresh token")]
    RefreshTokenUnknown,

    /// Refresh token held by a user but with a bad signature or past expiry
    #[error("Invalid or expired refresh token")]
    RefreshTokenInvalid,

    /// Logout request without a refresh token
    #[error("Refresh token required")]
    LogoutTokenRequired,

    /// Logout with a refresh token no user holds
    #[error("User not found")]
    LogoutTokenUnknown,

    /// Request body or field failed validation
    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::EmailTaken
            | AuthError::InvalidCredentials
            | AuthError::LogoutTokenRequired
            | AuthError::LogoutTokenUnknown
            | AuthError::Validation(_) => ErrorKind::BadRequest,
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::AccessTokenMissing
            | AuthError::AccessTokenInvalid
            | AuthError::RefreshTokenRequired => ErrorKind::Unauthorized,
            AuthError::RefreshTokenUnknown | AuthError::RefreshTokenInvalid => {
                ErrorKind::Forbidden
            }
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    pub fn into_app_error(self) -> AppError {
        match self {
            AuthError::Database(e) => AppError::from(e),
            other => AppError::new(other.kind(), other.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::RefreshTokenUnknown | AuthError::RefreshTokenInvalid => {
                tracing::warn!(error = %self, "Refresh token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.into_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        if err.is_server_error() {
            AuthError::Internal(err.message().to_string())
        } else {
            AuthError::Validation(err.message().to_string())
        }
    }
}

impl From<PasswordPolicyError> for AuthError {
    fn from(err: PasswordPolicyError) -> Self {
        AuthError::Validation(err.to_string())
    }
}

impl From<PasswordHashError> for AuthError {
    fn from(err: PasswordHashError) -> Self {
        AuthError::Internal(err.to_string())
    }
}

impl From<TokenError> for AuthError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Encoding(msg) => AuthError::Internal(msg),
            TokenError::Expired | TokenError::Invalid => AuthError::AccessTokenInvalid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_statuses() {
        assert_eq!(AuthError::EmailTaken.status_code(), 400);
        assert_eq!(AuthError::UserNotFound.status_code(), 404);
        assert_eq!(AuthError::InvalidCredentials.status_code(), 400);
        assert_eq!(AuthError::AccessTokenMissing.status_code(), 401);
        assert_eq!(AuthError::AccessTokenInvalid.status_code(), 401);
        assert_eq!(AuthError::RefreshTokenRequired.status_code(), 401);
        assert_eq!(AuthError::RefreshTokenUnknown.status_code(), 403);
        assert_eq!(AuthError::RefreshTokenInvalid.status_code(), 403);
        assert_eq!(AuthError::LogoutTokenRequired.status_code(), 400);
        assert_eq!(AuthError::LogoutTokenUnknown.status_code(), 400);
        assert_eq!(AuthError::Internal("boom".into()).status_code(), 500);
    }

    #[test]
    fn test_messages() {
        assert_eq!(AuthError::EmailTaken.to_string(), "User already exists");
        assert_eq!(
            AuthError::RefreshTokenInvalid.into_app_error().message(),
            "Invalid or expired refresh token"
        );
        assert_eq!(
            AuthError::Validation("Email cannot be empty".into()).to_string(),
            "Email cannot be empty"
        );
    }

    #[test]
    fn test_database_error_keeps_driver_text_off_the_wire() {
        let driver = sqlx::Error::Protocol("syntax error at or near \"FROM\"".into());
        let err = AuthError::from(driver);
        assert_eq!(err.status_code(), 500);

        let app_err = err.into_app_error();
        assert_eq!(app_err.status_code(), 500);
        assert_eq!(app_err.message(), "Database error");
        assert!(!app_err.body().to_string().contains("syntax error"));
    }

    #[test]
    fn test_from_app_error() {
        let client = AuthError::from(AppError::bad_request("Invalid email format"));
        assert!(matches!(client, AuthError::Validation(ref m) if m == "Invalid email format"));

        let server = AuthError::from(AppError::internal("boom"));
        assert!(matches!(server, AuthError::Internal(_)));
    }

    #[test]
    fn test_token_errors_map_to_unauthorized() {
        assert!(matches!(
            AuthError::from(TokenError::Expired),
            AuthError::AccessTokenInvalid
        ));
        assert!(matches!(
            AuthError::from(TokenError::Encoding("x".into())),
            AuthError::Internal(_)
        ));
    }
}
