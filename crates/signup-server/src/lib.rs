//! Member Signup Server - club membership signup behind a single form.
//!
//! The server:
//! - Validates submitted signup forms
//! - Registers each member once, keyed by student ID and email
//! - Persists members to a configurable storage backend

pub mod api;
pub mod config;
pub mod error;
pub mod signup;

pub use config::Config;
pub use error::ApiError;
pub use signup::{Registrar, SignupError};
