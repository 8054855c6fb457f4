//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations with no business rules:
//! - Password hashing (bcrypt)
//! - Signed, expiring tokens (HS256 JWT)
//! - Rate limiting (store abstraction, in-memory store, axum middleware)
//! - Client identification from request headers

pub mod client;
pub mod password;
pub mod rate_limit;
pub mod token;
