//! Auth Middleware
//!
//! Access-token guard for protected routes.

use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, header};
use axum::middleware::Next;
use axum::response::Response;
use std::sync::Arc;

use crate::application::AuthenticateUseCase;
use crate::application::tokens::TokenIssuer;
use crate::error::AuthError;

/// Require a valid access token; on success the decoded
/// [`AuthenticatedUser`](crate::domain::entity::claims::AuthenticatedUser)
/// is added to the request extensions.
pub async fn require_access_token(
    State(tokens): State<Arc<TokenIssuer>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AuthError> {
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        None => None,
        Some(value) => Some(value.to_str().map_err(|_| AuthError::AccessTokenInvalid)?),
    };

    let user = AuthenticateUseCase::new(tokens).execute(authorization)?;

    tracing::debug!(user_id = %user.payload.id, "Access token accepted");
    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
