//! Signup flow errors.

use member_store::{DuplicateFields, StoreError};
use std::fmt;
use thiserror::Error;

/// Required form fields, in the order they are checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequiredField {
    Aka,
    Name,
    StudentId,
    Faculty,
    Email,
    DiscordName,
    Level,
    Experience,
    Interests,
}

impl fmt::Display for RequiredField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RequiredField::Aka => "aka",
            RequiredField::Name => "name",
            RequiredField::StudentId => "studentId",
            RequiredField::Faculty => "faculty",
            RequiredField::Email => "email",
            RequiredField::DiscordName => "discordName",
            RequiredField::Level => "level",
            RequiredField::Experience => "experience",
            RequiredField::Interests => "interests",
        };
        f.write_str(name)
    }
}

/// Payload rejected before reaching storage.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(RequiredField),

    #[error("No interests selected")]
    NoInterestsSelected,

    #[error("Invalid email format")]
    InvalidEmailFormat,
}

/// Failure while persisting a validated registration.
#[derive(Debug, Error)]
pub enum RegistrarError {
    #[error("Duplicate member ({0})")]
    DuplicateMember(DuplicateFields),

    #[error("Storage backend unavailable: {0}")]
    BackendUnavailable(String),
}

impl From<StoreError> for RegistrarError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Duplicate(fields) => RegistrarError::DuplicateMember(fields),
            StoreError::Backend(msg) => RegistrarError::BackendUnavailable(msg),
        }
    }
}

/// Any rejection of a submission.
#[derive(Debug, Error)]
pub enum SignupError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Registrar(#[from] RegistrarError),
}
