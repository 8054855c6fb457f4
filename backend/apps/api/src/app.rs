//! Router Assembly
//!
//! Everything between the socket and the auth handlers: banner route, rate
//! limiting, request tracing, CORS and the error boundary.

use axum::http::{HeaderValue, Method, header};
use axum::{Router, middleware, routing::get};
use platform::rate_limit::{RateLimitStore, RateLimiter, enforce_rate_limit};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{AllowHeaders, AllowMethods, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::boundary;

pub const BANNER: &str = "Login service is up and running";

async fn banner() -> &'static str {
    BANNER
}

/// Permissive unless origins are listed
pub fn cors_layer(origins: Option<&[String]>) -> CorsLayer {
    let Some(origins) = origins else {
        return CorsLayer::permissive();
    };

    let allowed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed_origins)
        .allow_methods(AllowMethods::list([
            Method::GET,
            Method::POST,
            Method::OPTIONS,
        ]))
        .allow_headers(AllowHeaders::list([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            header::ACCEPT,
        ]))
        .allow_credentials(true)
}

pub fn build_app<S>(auth: Router, limiter: RateLimiter<S>, cors: CorsLayer) -> Router
where
    S: RateLimitStore + Send + Sync + 'static,
{
    Router::new()
        .route("/", get(banner))
        .nest("/api/auth", auth)
        .fallback(boundary::not_found)
        .layer(middleware::from_fn_with_state(limiter, enforce_rate_limit::<S>))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .layer(CatchPanicLayer::custom(boundary::handle_panic))
}

#[cfg(test)]
mod tests {
    use super::*;
    use auth::{AuthConfig, MemoryUserRepository, auth_router_generic};
    use axum::body::Body;
    use axum::extract::ConnectInfo;
    use axum::http::{Request, StatusCode};
    use platform::rate_limit::{MemoryRateLimitStore, RateLimitConfig};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(max_requests: u32) -> Router {
        let auth = auth_router_generic(MemoryUserRepository::new(), AuthConfig::development());
        let limiter = RateLimiter::new(
            Arc::new(MemoryRateLimitStore::new()),
            RateLimitConfig::new(max_requests, 60),
        );
        build_app(auth, limiter, cors_layer(None))
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .extension(ConnectInfo(SocketAddr::from(([198, 51, 100, 4], 50_000))))
            .body(Body::empty())
            .unwrap()
    }

    async fn body_text(response: axum::response::Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_banner() {
        let response = app(10).oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_text(response).await, BANNER);
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app(10).oneshot(get_request("/nope")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["message"], "Not Found");
    }

    #[tokio::test]
    async fn test_auth_routes_are_nested() {
        let response = app(10)
            .oneshot(get_request("/api/auth/profile"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_rate_limit_applies_to_every_route() {
        let app = app(2);

        for uri in ["/", "/api/auth/profile"] {
            let response = app.clone().oneshot(get_request(uri)).await.unwrap();
            assert_ne!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        }

        let response = app.clone().oneshot(get_request("/")).await.unwrap();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
        assert!(response.headers().contains_key(header::RETRY_AFTER));

        let json: serde_json::Value =
            serde_json::from_str(&body_text(response).await).unwrap();
        assert_eq!(json["message"], "Too many requests, please try again later.");
    }

    async fn preflight(cors: CorsLayer, origin: &str) -> axum::response::Response {
        let auth = auth_router_generic(MemoryUserRepository::new(), AuthConfig::development());
        let limiter = RateLimiter::new(
            Arc::new(MemoryRateLimitStore::new()),
            RateLimitConfig::default(),
        );
        let request = Request::builder()
            .method(Method::OPTIONS)
            .uri("/api/auth/login")
            .header(header::ORIGIN, origin)
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
            .extension(ConnectInfo(SocketAddr::from(([127, 0, 0, 1], 50_000))))
            .body(Body::empty())
            .unwrap();
        build_app(auth, limiter, cors).oneshot(request).await.unwrap()
    }

    #[tokio::test]
    async fn test_cors_origin_list() {
        let origins = vec!["http://localhost:3000".to_string(), "bad\norigin".to_string()];

        let allowed = preflight(cors_layer(Some(&origins)), "http://localhost:3000").await;
        assert_eq!(
            allowed.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://localhost:3000"
        );

        let other = preflight(cors_layer(Some(&origins)), "http://evil.test").await;
        assert!(!other.headers().contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
    }

    #[tokio::test]
    async fn test_cors_permissive_by_default() {
        let response = preflight(cors_layer(None), "http://anywhere.test").await;
        assert_eq!(
            response.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "*"
        );
    }
}
