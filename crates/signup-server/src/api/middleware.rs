//! Rate limiting, CORS and request logging middleware.

use crate::error::ApiError;
use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, Method},
    middleware::Next,
    response::Response,
};
use governor::{
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
    Quota, RateLimiter,
};
use std::{num::NonZeroU32, sync::Arc, time::Instant};
use tracing::{debug, error, warn};

/// Global rate limiter (not keyed by IP).
pub type GlobalLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

const DEFAULT_SUBMISSIONS_PER_MINUTE: NonZeroU32 = match NonZeroU32::new(60) {
    Some(n) => n,
    None => unreachable!(),
};

/// Rate limiter state shared across requests.
#[derive(Clone)]
pub struct RateLimitState {
    /// Global limiter for form submissions
    pub global: Arc<GlobalLimiter>,
}

impl RateLimitState {
    /// Create a new rate limit state allowing `submissions_per_minute`.
    pub fn new(submissions_per_minute: u32) -> Self {
        let quota = Quota::per_minute(
            NonZeroU32::new(submissions_per_minute).unwrap_or(DEFAULT_SUBMISSIONS_PER_MINUTE),
        );

        Self {
            global: Arc::new(RateLimiter::direct(quota)),
        }
    }

    /// Create a permissive rate limiter for testing.
    pub fn permissive() -> Self {
        Self::new(10_000)
    }
}

/// Rate limiting middleware.
///
/// Preflight requests pass through without spending quota.
pub async fn rate_limit_middleware(
    State(rate_limit): State<RateLimitState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if request.method() != Method::OPTIONS && rate_limit.global.check().is_err() {
        warn!("Submission rate limit exceeded");
        return Err(ApiError::RateLimitExceeded);
    }

    debug!("Rate limit check passed");
    Ok(next.run(request).await)
}

/// Allow any origin to read API responses.
pub async fn cors_middleware(request: Request, next: Next) -> Response {
    let mut response = next.run(request).await;
    response
        .headers_mut()
        .entry(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .or_insert(HeaderValue::from_static("*"));
    response
}

/// Per-request access log.
///
/// 4xx responses log at `warn`, 5xx at `error`.
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let started = Instant::now();

    let response = next.run(request).await;

    let status = response.status();
    let elapsed_ms = started.elapsed().as_millis() as u64;
    if status.is_server_error() {
        error!(%method, %path, status = status.as_u16(), elapsed_ms, "Request errored");
    } else if status.is_client_error() {
        warn!(%method, %path, status = status.as_u16(), elapsed_ms, "Request rejected");
    } else {
        debug!(%method, %path, status = status.as_u16(), elapsed_ms, "Request served");
    }

    response
}
