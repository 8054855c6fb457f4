//! Application Configuration
//!
//! Secrets, token lifetimes and hashing cost for the Auth application layer.

use chrono::Duration;
use platform::password::DEFAULT_COST;

/// Auth application configuration
#[derive(Clone)]
pub struct AuthConfig {
    /// HMAC secret for access tokens
    pub access_token_secret: Vec<u8>,
    /// HMAC secret for refresh tokens; must differ from the access secret
    pub refresh_token_secret: Vec<u8>,
    /// Access token lifetime (1 hour)
    pub access_token_ttl: Duration,
    /// Refresh token lifetime (7 days)
    pub refresh_token_ttl: Duration,
    /// bcrypt cost factor
    pub password_hash_cost: u32,
}

impl AuthConfig {
    pub fn new(
        access_token_secret: impl Into<Vec<u8>>,
        refresh_token_secret: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            access_token_secret: access_token_secret.into(),
            refresh_token_secret: refresh_token_secret.into(),
            access_token_ttl: Duration::hours(1),
            refresh_token_ttl: Duration::days(7),
            password_hash_cost: DEFAULT_COST,
        }
    }

    /// Create config with random secrets (for development)
    pub fn with_random_secrets() -> Self {
        use rand::RngCore;

        let mut access = [0u8; 32];
        let mut refresh = [0u8; 32];
        rand::rng().fill_bytes(&mut access);
        rand::rng().fill_bytes(&mut refresh);
        Self::new(access.to_vec(), refresh.to_vec())
    }

    /// Random secrets and the cheapest bcrypt cost
    pub fn development() -> Self {
        Self {
            password_hash_cost: platform::password::MIN_COST,
            ..Self::with_random_secrets()
        }
    }

    pub fn with_token_ttls(mut self, access: Duration, refresh: Duration) -> Self {
        self.access_token_ttl = access;
        self.refresh_token_ttl = refresh;
        self
    }

    pub fn with_password_hash_cost(mut self, cost: u32) -> Self {
        self.password_hash_cost = cost;
        self
    }
}

impl std::fmt::Debug for AuthConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthConfig")
            .field("access_token_secret", &"[REDACTED]")
            .field("refresh_token_secret", &"[REDACTED]")
            .field("access_token_ttl", &self.access_token_ttl)
            .field("refresh_token_ttl", &self.refresh_token_ttl)
            .field("password_hash_cost", &self.password_hash_cost)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AuthConfig::new("access", "refresh");
        assert_eq!(config.access_token_ttl, Duration::seconds(3600));
        assert_eq!(config.refresh_token_ttl, Duration::seconds(604_800));
        assert_eq!(config.password_hash_cost, 10);
    }

    #[test]
    fn test_random_secrets_differ() {
        let config = AuthConfig::with_random_secrets();
        assert_eq!(config.access_token_secret.len(), 32);
        assert_ne!(config.access_token_secret, config.refresh_token_secret);
    }

    #[test]
    fn test_debug_hides_secrets() {
        let config = AuthConfig::new("access-secret", "refresh-secret");
        let debug = format!("{:?}", config);
        assert!(!debug.contains("access-secret"));
        assert!(debug.contains("[REDACTED]"));
    }
}
