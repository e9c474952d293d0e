//! API response types.

use serde::Serialize;

/// Message shown after a committed submission.
pub const WELCOME_MESSAGE: &str = "Success: Welcome to the club!";

/// Response after a committed submission.
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    /// `None` when the store could not be counted
    pub members: Option<usize>,
    pub storage_healthy: bool,
}
