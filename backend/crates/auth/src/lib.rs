//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository trait
//! - `application/` - Use cases, token issuer, configuration
//! - `infra/` - PostgreSQL and in-memory repositories
//! - `presentation/` - HTTP handlers, DTOs, access guard, router
//!
//! ## Features
//! - Registration with username, email and password
//! - Login issuing a short-lived access token and a long-lived refresh token
//! - Access-token renewal against the stored refresh token
//! - Logout revoking the stored refresh token
//! - Bearer-token guard for protected routes
//!
//! ## Security Model
//! - Passwords hashed with bcrypt (cost 10 by default)
//! - HS256 JWTs; access and refresh tokens use separate secrets
//! - At most one live refresh token per user; login replaces it

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{memory::MemoryUserRepository, postgres::PgUserRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

// Convenience re-exports
pub mod models {
    pub use crate::domain::entity::*;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
