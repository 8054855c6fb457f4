//! HTTP Handlers

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::{Extension, Json};
use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::application::tokens::TokenIssuer;
use crate::application::{
    LoginInput, LoginUseCase, LogoutUseCase, RefreshTokenUseCase, RegisterInput, RegisterUseCase,
};
use crate::domain::entity::claims::AuthenticatedUser;
use crate::domain::repository::UserRepository;
use crate::error::{AuthError, AuthResult};
use crate::presentation::dto::{
    LoginRequest, LoginResponse, MessageResponse, ProfileResponse, RefreshTokenRequest,
    RefreshTokenResponse, RegisterRequest, RegisterResponse,
};

/// Shared state for auth handlers
#[derive(Clone)]
pub struct AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub repo: Arc<R>,
    pub config: Arc<AuthConfig>,
    pub tokens: Arc<TokenIssuer>,
}

impl<R> AuthAppState<R>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    pub fn new(repo: R, config: AuthConfig) -> Self {
        let tokens = TokenIssuer::from_config(&config);
        Self {
            repo: Arc::new(repo),
            config: Arc::new(config),
            tokens: Arc::new(tokens),
        }
    }
}

/// Unwrap a JSON body, turning any rejection into a 400
fn json_body<T>(body: Result<Json<T>, JsonRejection>) -> AuthResult<T> {
    body.map(|Json(value)| value)
        .map_err(|rejection| AuthError::Validation(rejection.body_text()))
}

/// Like [`json_body`], but a request sent without a JSON body at all counts
/// as an empty one so the use case can report the missing token itself
fn token_body(
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AuthResult<RefreshTokenRequest> {
    match body {
        Err(JsonRejection::MissingJsonContentType(_)) => Ok(RefreshTokenRequest::default()),
        other => json_body(other),
    }
}

// ============================================================================
// Register
// ============================================================================

/// POST /api/auth/register
pub async fn register<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> AuthResult<(StatusCode, Json<RegisterResponse>)>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(body)?;
    let use_case = RegisterUseCase::new(state.repo.clone(), state.config.clone());

    let output = use_case
        .execute(RegisterInput {
            user_name: req.username,
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User registered successfully",
            user_id: output.user_id.to_string(),
        }),
    ))
}

// ============================================================================
// Login
// ============================================================================

/// POST /api/auth/login
pub async fn login<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> AuthResult<Json<LoginResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = json_body(body)?;
    let use_case = LoginUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case
        .execute(LoginInput {
            email: req.email,
            password: req.password,
        })
        .await?;

    Ok(Json(LoginResponse {
        token: output.access_token,
        refresh_token: output.refresh_token,
    }))
}

// ============================================================================
// Profile
// ============================================================================

/// GET /api/auth/profile (behind the access guard)
pub async fn profile(Extension(user): Extension<AuthenticatedUser>) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        message: "Access granted",
        user,
    })
}

// ============================================================================
// Refresh Token
// ============================================================================

/// POST /api/auth/refresh-token
pub async fn refresh_token<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AuthResult<Json<RefreshTokenResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = token_body(body)?;
    let use_case = RefreshTokenUseCase::new(state.repo.clone(), state.tokens.clone());

    let output = use_case.execute(req.refresh_token.as_deref()).await?;

    Ok(Json(RefreshTokenResponse {
        access_token: output.access_token,
    }))
}

// ============================================================================
// Logout
// ============================================================================

/// POST /api/auth/logout
pub async fn logout<R>(
    State(state): State<AuthAppState<R>>,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> AuthResult<Json<MessageResponse>>
where
    R: UserRepository + Clone + Send + Sync + 'static,
{
    let req = token_body(body)?;
    let use_case = LogoutUseCase::new(state.repo.clone());

    use_case.execute(req.refresh_token.as_deref()).await?;

    Ok(Json(MessageResponse {
        message: "Logged out successfully",
    }))
}
