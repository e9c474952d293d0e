//! HTTP API for member signup.

mod handlers;
mod middleware;
mod types;

pub use handlers::*;
pub use middleware::{cors_middleware, logging_middleware, rate_limit_middleware, RateLimitState};
pub use types::*;

use crate::signup::Registrar;
use axum::{middleware as axum_middleware, routing::get, routing::post, Router};
use member_store::DynMemberStore;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

/// Path of the signup form endpoint.
pub const FORM_PATH: &str = "/api/form";

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Validates and persists submissions
    pub registrar: Arc<Registrar>,
}

impl AppState {
    /// Create new application state around an initialized store.
    pub fn new(store: DynMemberStore) -> Self {
        Self {
            registrar: Arc::new(Registrar::new(store)),
        }
    }
}

/// Create the API router with the default submission rate limit.
pub fn create_router(state: AppState) -> Router {
    create_router_with_rate_limit(state, RateLimitState::new(60))
}

/// Create the API router with custom rate limiting.
pub fn create_router_with_rate_limit(state: AppState, rate_limit: RateLimitState) -> Router {
    let form = Router::new()
        .route(
            FORM_PATH,
            post(handlers::submit_form).options(handlers::preflight),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            rate_limit,
            rate_limit_middleware,
        ));

    Router::new()
        // Health check (no rate limiting)
        .route("/health", get(handlers::health))
        .merge(form)
        .layer(axum_middleware::from_fn(cors_middleware))
        .layer(axum_middleware::from_fn(logging_middleware))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
