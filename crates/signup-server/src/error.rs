//! HTTP error mapping for the signup API.

use crate::signup::{RegistrarError, SignupError, ValidationError};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use member_store::DuplicateFields;
use serde::Serialize;
use thiserror::Error;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid submission: {0}")]
    Validation(#[from] ValidationError),

    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    #[error("Duplicate member ({0})")]
    DuplicateMember(DuplicateFields),

    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("Rate limit exceeded")]
    RateLimitExceeded,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

impl ApiError {
    /// Status, machine-readable code and the message shown to the member.
    ///
    /// Backend details stay in the logs; the message never carries them.
    fn parts(&self) -> (StatusCode, &'static str, &'static str) {
        match self {
            ApiError::Validation(ValidationError::MissingField(_)) => (
                StatusCode::BAD_REQUEST,
                "MISSING_FIELD",
                "Please complete all required fields.",
            ),
            ApiError::Validation(ValidationError::NoInterestsSelected) => (
                StatusCode::BAD_REQUEST,
                "NO_INTERESTS_SELECTED",
                "Please select at least one area of interest.",
            ),
            ApiError::Validation(ValidationError::InvalidEmailFormat) => (
                StatusCode::BAD_REQUEST,
                "INVALID_EMAIL_FORMAT",
                "Invalid email format.",
            ),
            ApiError::InvalidBody(_) => (
                StatusCode::BAD_REQUEST,
                "INVALID_BODY",
                "Please complete all required fields.",
            ),
            ApiError::DuplicateMember(_) => (
                StatusCode::CONFLICT,
                "DUPLICATE_MEMBER",
                "Email or student ID is already registered.",
            ),
            ApiError::BackendUnavailable(_) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "BACKEND_UNAVAILABLE",
                "An unexpected error occurred. Please try again.",
            ),
            ApiError::RateLimitExceeded => (
                StatusCode::TOO_MANY_REQUESTS,
                "RATE_LIMIT_EXCEEDED",
                "Too many requests. Please try again later.",
            ),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.parts().0
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();

        let body = ErrorResponse {
            error: message.to_string(),
            code: code.to_string(),
        };

        (status, Json(body)).into_response()
    }
}

impl From<RegistrarError> for ApiError {
    fn from(e: RegistrarError) -> Self {
        match e {
            RegistrarError::DuplicateMember(fields) => ApiError::DuplicateMember(fields),
            RegistrarError::BackendUnavailable(msg) => ApiError::BackendUnavailable(msg),
        }
    }
}

impl From<SignupError> for ApiError {
    fn from(e: SignupError) -> Self {
        match e {
            SignupError::Invalid(e) => ApiError::Validation(e),
            SignupError::Registrar(e) => e.into(),
        }
    }
}

impl From<axum::extract::rejection::JsonRejection> for ApiError {
    fn from(e: axum::extract::rejection::JsonRejection) -> Self {
        ApiError::InvalidBody(e.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signup::RequiredField;

    async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
        let response = error.into_response();
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn test_validation_errors_are_bad_request() {
        let (status, json) =
            body_json(ValidationError::MissingField(RequiredField::Email).into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Please complete all required fields.");
        assert_eq!(json["code"], "MISSING_FIELD");

        let (status, json) = body_json(ValidationError::NoInterestsSelected.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Please select at least one area of interest.");

        let (status, json) = body_json(ValidationError::InvalidEmailFormat.into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["error"], "Invalid email format.");
    }

    #[tokio::test]
    async fn test_duplicate_is_conflict() {
        let (status, json) =
            body_json(ApiError::DuplicateMember(DuplicateFields::unspecified())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(json["code"], "DUPLICATE_MEMBER");
    }

    #[tokio::test]
    async fn test_backend_text_never_leaks() {
        let error = ApiError::from(RegistrarError::BackendUnavailable(
            "disk I/O error at /data/members.db".into(),
        ));
        let (status, json) = body_json(error).await;

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(json["error"], "An unexpected error occurred. Please try again.");
        assert!(!json.to_string().contains("members.db"));
    }

    #[test]
    fn test_signup_error_conversion() {
        let error = ApiError::from(SignupError::from(ValidationError::InvalidEmailFormat));
        assert_eq!(error.status(), StatusCode::BAD_REQUEST);

        let error = ApiError::from(SignupError::from(RegistrarError::DuplicateMember(
            DuplicateFields::unspecified(),
        )));
        assert_eq!(error.status(), StatusCode::CONFLICT);

        assert_eq!(ApiError::RateLimitExceeded.status(), StatusCode::TOO_MANY_REQUESTS);
    }
}
