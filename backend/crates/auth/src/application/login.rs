//! Login Use Case
//!
//! Verifies credentials and issues an access/refresh token pair. The new
//! refresh token replaces whatever the user held before.

use std::sync::Arc;

use crate::application::tokens::TokenIssuer;
use crate::domain::entity::claims::TokenClaims;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

/// Login input
pub struct LoginInput {
    pub email: String,
    pub password: String,
}

/// Login output
#[derive(Debug)]
pub struct LoginOutput {
    pub access_token: String,
    pub refresh_token: String,
}

/// Login use case
pub struct LoginUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    tokens: Arc<TokenIssuer>,
}

impl<U> LoginUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, tokens: Arc<TokenIssuer>) -> Self {
        Self { user_repo, tokens }
    }

    pub async fn execute(&self, input: LoginInput) -> AuthResult<LoginOutput> {
        // An email that cannot exist cannot be on file either
        let email = Email::new(input.email).map_err(|_| AuthError::UserNotFound)?;

        let mut user = self
            .user_repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::UserNotFound)?;

        let candidate =
            RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;
        if !user.password_hash.verify(candidate).await? {
            return Err(AuthError::InvalidCredentials);
        }

        let claims = TokenClaims::for_user(&user);
        let access = self.tokens.issue_access(&claims)?;
        let refresh = self.tokens.issue_refresh(&claims)?;

        user.set_refresh_token(Some(refresh.token.clone()));
        self.user_repo.update_refresh_token(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            refresh_expires_at = %refresh.expires_at,
            "User logged in"
        );

        Ok(LoginOutput {
            access_token: access.token,
            refresh_token: refresh.token,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::config::AuthConfig;
    use crate::application::register::{RegisterInput, RegisterUseCase};
    use crate::infra::memory::MemoryUserRepository;

    async fn setup() -> (
        MemoryUserRepository,
        LoginUseCase<MemoryUserRepository>,
        Arc<TokenIssuer>,
    ) {
        let repo = MemoryUserRepository::new();
        let config = Arc::new(AuthConfig::development());
        let tokens = Arc::new(TokenIssuer::from_config(&config));

        RegisterUseCase::new(Arc::new(repo.clone()), config)
            .execute(RegisterInput {
                user_name: "alice".into(),
                email: "a@x.com".into(),
                password: "pw123".into(),
            })
            .await
            .unwrap();

        let login = LoginUseCase::new(Arc::new(repo.clone()), tokens.clone());
        (repo, login, tokens)
    }

    fn input(email: &str, password: &str) -> LoginInput {
        LoginInput {
            email: email.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn test_login_issues_and_persists_tokens() {
        let (repo, login, tokens) = setup().await;

        let output = login.execute(input("a@x.com", "pw123")).await.unwrap();

        let access = tokens.verify_access(&output.access_token).unwrap();
        assert_eq!(access.payload.email, "a@x.com");

        let holder = repo
            .find_by_refresh_token(&output.refresh_token)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(holder.user_id.to_string(), access.payload.id);
    }

    #[tokio::test]
    async fn test_second_login_overwrites_refresh_token() {
        let (repo, login, _) = setup().await;

        let first = login.execute(input("a@x.com", "pw123")).await.unwrap();
        // iat has one-second resolution; make sure the second token differs
        tokio::time::sleep(std::time::Duration::from_millis(1100)).await;
        let second = login.execute(input("a@x.com", "pw123")).await.unwrap();

        assert_ne!(first.refresh_token, second.refresh_token);
        assert!(repo.find_by_refresh_token(&first.refresh_token).await.unwrap().is_none());
        assert!(repo.find_by_refresh_token(&second.refresh_token).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_wrong_password() {
        let (_, login, _) = setup().await;
        let result = login.execute(input("a@x.com", "wrong")).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));

        let empty = login.execute(input("a@x.com", "")).await;
        assert!(matches!(empty, Err(AuthError::InvalidCredentials)));

        // Past bcrypt's 72-byte window: refused, not truncated
        let long = format!("pw123{}", "x".repeat(80));
        let result = login.execute(input("a@x.com", &long)).await;
        assert!(matches!(result, Err(AuthError::InvalidCredentials)));
    }

    #[tokio::test]
    async fn test_unknown_email() {
        let (_, login, _) = setup().await;
        let result = login.execute(input("b@x.com", "pw123")).await;
        assert!(matches!(result, Err(AuthError::UserNotFound)));

        let unparseable = login.execute(input("nobody", "pw123")).await;
        assert!(matches!(unparseable, Err(AuthError::UserNotFound)));
    }
}
