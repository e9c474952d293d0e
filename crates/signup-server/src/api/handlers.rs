//! HTTP request handlers.

use super::types::{HealthResponse, SubmitResponse, WELCOME_MESSAGE};
use super::AppState;
use crate::error::ApiError;
use crate::signup::RawRegistration;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use tracing::{error, info, warn};

/// Health check endpoint.
pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = state.registrar.store();
    let storage_healthy = store.health_check().await;
    let members = store
        .count()
        .await
        .inspect_err(|e| error!(error = %e, "Member count failed"))
        .ok();

    Json(HealthResponse {
        status: "ok".to_string(),
        members,
        storage_healthy,
    })
}

/// Accept a signup form submission.
pub async fn submit_form(
    State(state): State<AppState>,
    payload: Result<Json<RawRegistration>, JsonRejection>,
) -> Result<(StatusCode, Json<SubmitResponse>), ApiError> {
    let Json(raw) = payload.inspect_err(|e| {
        warn!(reason = %e.body_text(), "Rejected unreadable submission body");
    })?;

    let created = state.registrar.register(&raw).await?;
    info!(id = created.id, "Submission committed");

    Ok((
        StatusCode::CREATED,
        Json(SubmitResponse {
            message: WELCOME_MESSAGE.to_string(),
        }),
    ))
}

/// Answer a CORS preflight for the form endpoint.
pub async fn preflight() -> impl IntoResponse {
    (
        StatusCode::NO_CONTENT,
        [
            (header::ACCESS_CONTROL_ALLOW_ORIGIN, "*"),
            (header::ACCESS_CONTROL_ALLOW_METHODS, "POST, OPTIONS"),
            (header::ACCESS_CONTROL_ALLOW_HEADERS, "Content-Type, Authorization"),
            (header::ACCESS_CONTROL_MAX_AGE, "86400"),
        ],
    )
}
