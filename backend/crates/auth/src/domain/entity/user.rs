//! User Entity
//!
//! Account record: profile, credentials and the one outstanding refresh
//! token, if any.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    email::Email, user_id::UserId, user_name::UserName, user_password::UserPassword,
};

#[derive(Debug, Clone)]
pub struct User {
    pub user_id: UserId,
    /// Display name (not unique)
    pub user_name: UserName,
    /// Login identifier (unique)
    pub email: Email,
    pub password_hash: UserPassword,
    /// Last issued refresh token; `None` before the first login and after logout
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// New account with a fresh id and no refresh token
    pub fn new(user_name: UserName, email: Email, password_hash: UserPassword) -> Self {
        let now = Utc::now();

        Self {
            user_id: UserId::new(),
            user_name,
            email,
            password_hash,
            refresh_token: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace (login) or clear (logout) the stored refresh token
    pub fn set_refresh_token(&mut self, token: Option<String>) {
        self.refresh_token = token;
        self.updated_at = Utc::now();
    }

    pub fn holds_refresh_token(&self, token: &str) -> bool {
        self.refresh_token.as_deref() == Some(token)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::user_password::RawPassword;
    use platform::password::MIN_COST;

    async fn user() -> User {
        let hash = UserPassword::hash(RawPassword::new("pw123".into()).unwrap(), MIN_COST)
            .await
            .unwrap();
        User::new(
            UserName::new("alice").unwrap(),
            Email::new("a@x.com").unwrap(),
            hash,
        )
    }

    #[tokio::test]
    async fn test_new_user_has_no_refresh_token() {
        let user = user().await;
        assert!(user.refresh_token.is_none());
        assert_eq!(user.created_at, user.updated_at);
    }

    #[tokio::test]
    async fn test_refresh_token_lifecycle() {
        let mut user = user().await;

        user.set_refresh_token(Some("first".into()));
        assert!(user.holds_refresh_token("first"));

        user.set_refresh_token(Some("second".into()));
        assert!(!user.holds_refresh_token("first"));
        assert!(user.holds_refresh_token("second"));

        user.set_refresh_token(None);
        assert!(!user.holds_refresh_token("second"));
        assert!(user.updated_at >= user.created_at);
    }
}
