//! Rate Limiting Infrastructure
//!
//! Fixed-window request caps per client key, a storage abstraction, an
//! in-memory store and the axum middleware that gates every route.

use axum::body::Body;
use axum::extract::{ConnectInfo, State};
use axum::http::{HeaderValue, Request, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use chrono::Utc;
use kernel::error::app_error::AppError;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

use crate::client::client_key;

/// Body message for rejected requests
pub const DEFAULT_LIMIT_MESSAGE: &str = "Too many requests, please try again later.";

/// Rate limit configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests allowed in the window
    pub max_requests: u32,
    /// Time window duration
    pub window: Duration,
    /// Message returned with 429
    pub message: String,
    /// Key on `X-Forwarded-For` instead of the socket address
    pub trust_proxy: bool,
}

impl Default for RateLimitConfig {
    /// 100 requests per 15 minutes
    fn default() -> Self {
        Self {
            max_requests: 100,
            window: Duration::from_secs(15 * 60),
            message: DEFAULT_LIMIT_MESSAGE.to_string(),
            trust_proxy: false,
        }
    }
}

impl RateLimitConfig {
    pub fn new(max_requests: u32, window_secs: u64) -> Self {
        Self {
            max_requests,
            window: Duration::from_secs(window_secs),
            ..Self::default()
        }
    }

    pub fn with_trust_proxy(mut self, trust_proxy: bool) -> Self {
        self.trust_proxy = trust_proxy;
        self
    }

    pub fn window_ms(&self) -> i64 {
        self.window.as_millis() as i64
    }
}

/// Rate limit check result
#[derive(Debug, Clone)]
pub struct RateLimitResult {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at_ms: i64,
}

impl RateLimitResult {
    /// Whole seconds until the window resets (at least 1)
    pub fn retry_after_secs(&self, now_ms: i64) -> u64 {
        let millis = (self.reset_at_ms - now_ms).max(0) as u64;
        millis.div_ceil(1000).max(1)
    }
}

/// Trait for rate limit storage backends
#[trait_variant::make(RateLimitStore: Send)]
pub trait LocalRateLimitStore {
    /// Count one request for `key` and report whether it is within the cap
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>>;
}

// ============================================================================
// In-memory store
// ============================================================================

#[derive(Debug, Clone, Copy)]
struct Window {
    started_at_ms: i64,
    count: u32,
}

/// Process-local counters
#[derive(Debug, Default)]
pub struct MemoryRateLimitStore {
    windows: Mutex<HashMap<String, Window>>,
}

impl MemoryRateLimitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count a request at an explicit time
    pub fn check_at(&self, key: &str, config: &RateLimitConfig, now_ms: i64) -> RateLimitResult {
        let mut windows = self.windows.lock();
        let window = windows.entry(key.to_string()).or_insert(Window {
            started_at_ms: now_ms,
            count: 0,
        });

        if now_ms - window.started_at_ms >= config.window_ms() {
            *window = Window {
                started_at_ms: now_ms,
                count: 0,
            };
        }

        window.count = window.count.saturating_add(1);

        RateLimitResult {
            allowed: window.count <= config.max_requests,
            remaining: config.max_requests.saturating_sub(window.count),
            reset_at_ms: window.started_at_ms + config.window_ms(),
        }
    }

    /// Drop windows that have already ended; returns how many were removed
    pub fn prune(&self, config: &RateLimitConfig, now_ms: i64) -> usize {
        let mut windows = self.windows.lock();
        let before = windows.len();
        windows.retain(|_, w| now_ms - w.started_at_ms < config.window_ms());
        before - windows.len()
    }

    pub fn tracked_clients(&self) -> usize {
        self.windows.lock().len()
    }

    /// Prune once per window in the background
    pub fn spawn_pruner(self: Arc<Self>, config: RateLimitConfig) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(config.window);
            loop {
                ticker.tick().await;
                let removed = self.prune(&config, Utc::now().timestamp_millis());
                if removed > 0 {
                    tracing::debug!(removed, "Pruned expired rate limit windows");
                }
            }
        })
    }
}

impl RateLimitStore for MemoryRateLimitStore {
    async fn check_and_increment(
        &self,
        key: &str,
        config: &RateLimitConfig,
    ) -> Result<RateLimitResult, Box<dyn std::error::Error + Send + Sync>> {
        Ok(self.check_at(key, config, Utc::now().timestamp_millis()))
    }
}

// ============================================================================
// Middleware
// ============================================================================

/// Middleware state: a store plus its configuration
pub struct RateLimiter<S> {
    pub store: Arc<S>,
    pub config: Arc<RateLimitConfig>,
}

impl<S> RateLimiter<S> {
    pub fn new(store: Arc<S>, config: RateLimitConfig) -> Self {
        Self {
            store,
            config: Arc::new(config),
        }
    }
}

impl<S> Clone for RateLimiter<S> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
        }
    }
}

/// Reject callers over their cap with 429
///
/// Store failures let the request through; a broken counter must not take
/// the whole API down.
pub async fn enforce_rate_limit<S>(
    State(limiter): State<RateLimiter<S>>,
    req: Request<Body>,
    next: Next,
) -> Response
where
    S: RateLimitStore + Send + Sync + 'static,
{
    let direct_ip = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip());
    let key = client_key(req.headers(), direct_ip, limiter.config.trust_proxy);

    let result = match limiter.store.check_and_increment(&key, &limiter.config).await {
        Ok(result) => result,
        Err(e) => {
            tracing::error!(error = %e, client = %key, "Rate limit store failed");
            return next.run(req).await;
        }
    };

    if !result.allowed {
        let retry_after = result.retry_after_secs(Utc::now().timestamp_millis());
        tracing::warn!(client = %key, retry_after_secs = retry_after, "Rate limit exceeded");

        let mut response =
            AppError::too_many_requests(limiter.config.message.clone()).into_response();
        response
            .headers_mut()
            .insert(header::RETRY_AFTER, HeaderValue::from(retry_after));
        return response;
    }

    let mut response = next.run(req).await;
    let headers = response.headers_mut();
    headers.insert(
        "x-ratelimit-limit",
        HeaderValue::from(limiter.config.max_requests),
    );
    headers.insert("x-ratelimit-remaining", HeaderValue::from(result.remaining));
    response
}
