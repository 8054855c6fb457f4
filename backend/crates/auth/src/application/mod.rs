//! Application Layer
//!
//! Use cases and application services.

pub mod authenticate;
pub mod config;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod tokens;

// Re-exports
pub use authenticate::AuthenticateUseCase;
pub use config::AuthConfig;
pub use login::{LoginInput, LoginOutput, LoginUseCase};
pub use logout::LogoutUseCase;
pub use refresh_token::{RefreshTokenOutput, RefreshTokenUseCase};
pub use register::{RegisterInput, RegisterOutput, RegisterUseCase};
pub use tokens::TokenIssuer;
