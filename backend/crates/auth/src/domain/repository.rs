//! Repository Traits
//!
//! Interfaces for data persistence. Implementations are in the infra layer.

use crate::domain::entity::user::User;
use crate::domain::value_object::email::Email;
use crate::error::AuthResult;

/// User repository trait
#[trait_variant::make(UserRepository: Send)]
pub trait LocalUserRepository {
    /// Insert a new user; a duplicate email fails with `AuthError::EmailTaken`
    async fn create(&self, user: &User) -> AuthResult<()>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<User>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Find the user whose stored refresh token equals `token` exactly
    async fn find_by_refresh_token(&self, token: &str) -> AuthResult<Option<User>>;

    /// Persist `user.refresh_token` (and `updated_at`)
    async fn update_refresh_token(&self, user: &User) -> AuthResult<()>;
}
