//! Member registration types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Backend-assigned identifier of a persisted registration.
pub type PersistedId = i64;

/// How a backend resolves the uniqueness of `student_id` and `email`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniquenessStrategy {
    /// Query for an existing member before writing.
    PreCheck,
    /// Write directly and let the storage constraint reject duplicates.
    #[default]
    ConstraintRejection,
}

impl fmt::Display for UniquenessStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniquenessStrategy::PreCheck => write!(f, "pre_check"),
            UniquenessStrategy::ConstraintRejection => write!(f, "constraint_rejection"),
        }
    }
}

/// A field that must be unique across all registrations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UniqueField {
    StudentId,
    Email,
}

impl UniqueField {
    /// Map a storage column name onto the unique field it holds.
    pub fn from_column(column: &str) -> Option<Self> {
        match column {
            "student_id" => Some(UniqueField::StudentId),
            "email" => Some(UniqueField::Email),
            _ => None,
        }
    }
}

impl fmt::Display for UniqueField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UniqueField::StudentId => write!(f, "student_id"),
            UniqueField::Email => write!(f, "email"),
        }
    }
}

/// The set of unique fields that collided with an existing member.
///
/// An empty set means the backend rejected the write for uniqueness
/// without saying which field collided.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DuplicateFields(Vec<UniqueField>);

impl DuplicateFields {
    pub fn unspecified() -> Self {
        Self(Vec::new())
    }

    pub fn of(fields: impl IntoIterator<Item = UniqueField>) -> Self {
        let mut fields: Vec<UniqueField> = fields.into_iter().collect();
        fields.sort();
        fields.dedup();
        Self(fields)
    }

    /// Work out which unique fields `existing` shares with a candidate.
    pub fn between(existing: &Registration, student_id: &str, email: &str) -> Self {
        let mut fields = Vec::new();
        if existing.student_id == student_id {
            fields.push(UniqueField::StudentId);
        }
        if existing.email == email {
            fields.push(UniqueField::Email);
        }
        Self::of(fields)
    }

    pub fn contains(&self, field: UniqueField) -> bool {
        self.0.contains(&field)
    }

    pub fn is_unspecified(&self) -> bool {
        self.0.is_empty()
    }

    pub fn fields(&self) -> &[UniqueField] {
        &self.0
    }
}

impl fmt::Display for DuplicateFields {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return write!(f, "unspecified");
        }
        let names: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        write!(f, "{}", names.join(", "))
    }
}

/// A registration ready to be written, with every field already trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewRegistration {
    pub aka: String,
    pub name: String,
    pub student_id: String,
    pub faculty: String,
    pub email: String,
    pub discord_name: String,
    pub level: String,
    pub interests: Vec<String>,
    pub experience: String,
    pub created_at: DateTime<Utc>,
}

/// A persisted member registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub id: PersistedId,
    pub aka: String,
    pub name: String,
    pub student_id: String,
    pub faculty: String,
    pub email: String,
    pub discord_name: String,
    pub level: String,
    pub interests: Vec<String>,
    pub experience: String,
    pub created_at: DateTime<Utc>,
}

impl Registration {
    pub fn from_new(id: PersistedId, new: NewRegistration) -> Self {
        Self {
            id,
            aka: new.aka,
            name: new.name,
            student_id: new.student_id,
            faculty: new.faculty,
            email: new.email,
            discord_name: new.discord_name,
            level: new.level,
            interests: new.interests,
            experience: new.experience,
            created_at: new.created_at,
        }
    }
}

/// Join interest tags into the comma-delimited form used on the wire and in SQL.
pub fn join_interests(interests: &[String]) -> String {
    interests.join(",")
}

/// Split a comma-delimited interest list, trimming tokens and dropping blanks.
pub fn split_interests(joined: &str) -> Vec<String> {
    joined
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}
