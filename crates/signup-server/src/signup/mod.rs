//! Member signup flow: validation followed by race-safe registration.

mod error;
mod registrar;
mod types;
mod validator;

pub use error::{RegistrarError, RequiredField, SignupError, ValidationError};
pub use registrar::Registrar;
pub use types::{Created, FieldValue, NormalizedRegistration, RawRegistration};
pub use validator::{is_valid_email, normalize_interests, validate};
