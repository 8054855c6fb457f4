//! Server Configuration
//!
//! Read once at startup from the process environment (after `.env` is
//! loaded). Parsing goes through a lookup function so it can be exercised
//! without touching real environment variables.

use auth::AuthConfig;
use platform::password::{DEFAULT_COST, MAX_COST, MIN_COST};
use platform::rate_limit::RateLimitConfig;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_PORT: u16 = 5000;
const DEFAULT_MAX_CONNECTIONS: u32 = 5;
const DEFAULT_ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;
const DEFAULT_REFRESH_TOKEN_TTL_SECS: i64 = 7 * 24 * 60 * 60;
const DEFAULT_RATE_LIMIT_MAX_REQUESTS: u32 = 100;
const DEFAULT_RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("JWT_SECRET and JWT_REFRESH_SECRET must differ")]
    SharedSecret,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub port: u16,
    pub database_url: String,
    pub database_max_connections: u32,
    pub auth: AuthConfig,
    pub rate_limit: RateLimitConfig,
    /// `None` means any origin is allowed
    pub frontend_origins: Option<Vec<String>>,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = Env(lookup);

        let access_secret = env.required("JWT_SECRET")?;
        let refresh_secret = env.required("JWT_REFRESH_SECRET")?;
        if access_secret == refresh_secret {
            return Err(ConfigError::SharedSecret);
        }

        let bcrypt_cost = env.parsed("BCRYPT_COST", DEFAULT_COST)?;
        if !(MIN_COST..=MAX_COST).contains(&bcrypt_cost) {
            return Err(ConfigError::Invalid {
                key: "BCRYPT_COST",
                value: bcrypt_cost.to_string(),
                reason: format!("expected {}..={}", MIN_COST, MAX_COST),
            });
        }

        let access_ttl = env.positive("ACCESS_TOKEN_TTL_SECS", DEFAULT_ACCESS_TOKEN_TTL_SECS)?;
        let refresh_ttl =
            env.positive("REFRESH_TOKEN_TTL_SECS", DEFAULT_REFRESH_TOKEN_TTL_SECS)?;

        let auth = AuthConfig::new(access_secret, refresh_secret)
            .with_token_ttls(
                chrono::Duration::seconds(access_ttl),
                chrono::Duration::seconds(refresh_ttl),
            )
            .with_password_hash_cost(bcrypt_cost);

        let rate_limit = RateLimitConfig::new(
            env.parsed("RATE_LIMIT_MAX_REQUESTS", DEFAULT_RATE_LIMIT_MAX_REQUESTS)?,
            env.positive("RATE_LIMIT_WINDOW_SECS", DEFAULT_RATE_LIMIT_WINDOW_SECS)?,
        )
        .with_trust_proxy(env.parsed("TRUST_PROXY", false)?);

        let frontend_origins = env.optional("FRONTEND_ORIGINS").map(|raw| {
            raw.split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(str::to_string)
                .collect::<Vec<_>>()
        });

        Ok(Self {
            port: env.parsed("PORT", DEFAULT_PORT)?,
            database_url: env.required("DATABASE_URL")?,
            database_max_connections: env
                .positive("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS)?,
            auth,
            rate_limit,
            frontend_origins: frontend_origins.filter(|origins| !origins.is_empty()),
        })
    }
}

struct Env<F>(F);

impl<F> Env<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Unset and blank are the same thing
    fn optional(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|value| !value.trim().is_empty())
    }

    fn required(&self, key: &'static str) -> Result<String, ConfigError> {
        self.optional(key).ok_or(ConfigError::Missing(key))
    }

    fn parsed<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr,
        T::Err: std::fmt::Display,
    {
        match self.optional(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse().map_err(|e: T::Err| ConfigError::Invalid {
                key,
                reason: e.to_string(),
                value: raw,
            }),
        }
    }

    fn positive<T>(&self, key: &'static str, default: T) -> Result<T, ConfigError>
    where
        T: FromStr + PartialOrd + Default + ToString,
        T::Err: std::fmt::Display,
    {
        let value = self.parsed(key, default)?;
        if value <= T::default() {
            return Err(ConfigError::Invalid {
                key,
                value: value.to_string(),
                reason: "must be greater than zero".to_string(),
            });
        }
        Ok(value)
    }
}
