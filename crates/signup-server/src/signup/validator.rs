//! Submission validation.

use super::error::{RequiredField, ValidationError};
use super::types::{integral_text, FieldValue, NormalizedRegistration, RawRegistration};
use member_store::split_interests;
use regex::Regex;
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid email pattern"));

/// Check a raw submission and normalize it.
///
/// Rules run in order and the first failure wins: every field must be
/// present and non-blank, at least one interest must survive splitting,
/// and the email must look like `local@domain.tld` exactly as submitted.
/// Surrounding whitespace on the email is a format error, not trimmed away.
pub fn validate(raw: &RawRegistration) -> Result<NormalizedRegistration, ValidationError> {
    let aka = required(&raw.aka, RequiredField::Aka)?;
    let name = required(&raw.name, RequiredField::Name)?;
    let student_id = required(&raw.stuid, RequiredField::StudentId)?;
    let faculty = required(&raw.faculty, RequiredField::Faculty)?;
    let email = required(&raw.email, RequiredField::Email)?;
    let discord_name = required(&raw.disname, RequiredField::DiscordName)?;
    let level = required(&raw.level, RequiredField::Level)?;
    let experience = required(&raw.experience, RequiredField::Experience)?;
    let interested = raw
        .interested
        .as_ref()
        .ok_or(ValidationError::MissingField(RequiredField::Interests))?;

    let interests = normalize_interests(interested);
    if interests.is_empty() {
        return Err(ValidationError::NoInterestsSelected);
    }

    let submitted_email = match &raw.email {
        Some(FieldValue::Text(text)) => text.as_str(),
        _ => email.as_str(),
    };
    if !is_valid_email(submitted_email) {
        return Err(ValidationError::InvalidEmailFormat);
    }

    Ok(NormalizedRegistration {
        aka,
        name,
        student_id,
        faculty,
        email,
        discord_name,
        level,
        interests,
        experience,
    })
}

fn required(value: &Option<FieldValue>, field: RequiredField) -> Result<String, ValidationError> {
    value
        .as_ref()
        .and_then(FieldValue::scalar)
        .ok_or(ValidationError::MissingField(field))
}

/// Split the interest selection into tags, keeping the first occurrence of each.
pub fn normalize_interests(value: &FieldValue) -> Vec<String> {
    let tags = match value {
        FieldValue::Text(joined) => split_interests(joined),
        FieldValue::Number(n) => integral_text(n).into_iter().collect(),
        FieldValue::List(items) => items.iter().flat_map(|item| split_interests(item)).collect(),
    };

    let mut unique: Vec<String> = Vec::with_capacity(tags.len());
    for tag in tags {
        if !unique.contains(&tag) {
            unique.push(tag);
        }
    }
    unique
}

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_PATTERN.is_match(email)
}
