//! Register Use Case
//!
//! Creates a new user account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::user::User;
use crate::domain::repository::UserRepository;
use crate::domain::value_object::{
    email::Email,
    user_id::UserId,
    user_name::UserName,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

/// Register input
pub struct RegisterInput {
    pub user_name: String,
    pub email: String,
    pub password: String,
}

/// Register output
#[derive(Debug)]
pub struct RegisterOutput {
    pub user_id: UserId,
}

/// Register use case
pub struct RegisterUseCase<U>
where
    U: UserRepository,
{
    user_repo: Arc<U>,
    config: Arc<AuthConfig>,
}

impl<U> RegisterUseCase<U>
where
    U: UserRepository,
{
    pub fn new(user_repo: Arc<U>, config: Arc<AuthConfig>) -> Self {
        Self { user_repo, config }
    }

    pub async fn execute(&self, input: RegisterInput) -> AuthResult<RegisterOutput> {
        let user_name = UserName::new(&input.user_name)?;
        let email = Email::new(input.email)?;
        let raw_password = RawPassword::new(input.password)?;

        if self.user_repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash =
            UserPassword::hash(raw_password, self.config.password_hash_cost).await?;
        let user = User::new(user_name, email, password_hash);

        // A concurrent registration can still win the race; the store maps
        // the unique violation to EmailTaken.
        self.user_repo.create(&user).await?;

        tracing::info!(
            user_id = %user.user_id,
            email = %user.email,
            "User registered"
        );

        Ok(RegisterOutput {
            user_id: user.user_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::memory::MemoryUserRepository;

    fn use_case(repo: &MemoryUserRepository) -> RegisterUseCase<MemoryUserRepository> {
        RegisterUseCase::new(Arc::new(repo.clone()), Arc::new(AuthConfig::development()))
    }

    fn input(email: &str) -> RegisterInput {
        RegisterInput {
            user_name: "alice".into(),
            email: email.into(),
            password: "pw123".into(),
        }
    }

    #[tokio::test]
    async fn test_register_stores_hashed_user() {
        let repo = MemoryUserRepository::new();
        let output = use_case(&repo).execute(input("A@X.com")).await.unwrap();

        let email = Email::new("a@x.com").unwrap();
        let stored = repo.find_by_email(&email).await.unwrap().unwrap();
        assert_eq!(stored.user_id, output.user_id);
        assert_eq!(stored.user_name.as_str(), "alice");
        assert_ne!(stored.password_hash.as_str(), "pw123");
        assert!(stored.refresh_token.is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = MemoryUserRepository::new();
        let use_case = use_case(&repo);

        use_case.execute(input("a@x.com")).await.unwrap();
        let second = use_case.execute(input("A@x.COM")).await;
        assert!(matches!(second, Err(AuthError::EmailTaken)));
        assert_eq!(repo.len().await, 1);
    }

    #[tokio::test]
    async fn test_invalid_input_is_a_validation_error() {
        let repo = MemoryUserRepository::new();
        let use_case = use_case(&repo);

        let bad_email = use_case.execute(input("not-an-email")).await;
        assert!(matches!(bad_email, Err(AuthError::Validation(_))));

        let empty_password = use_case
            .execute(RegisterInput {
                password: String::new(),
                ..input("b@x.com")
            })
            .await;
        assert!(matches!(empty_password, Err(AuthError::Validation(_))));
        assert_eq!(repo.len().await, 0);
    }
}
