//! Submission payload and outcome types.

use chrono::{DateTime, Utc};
use member_store::{NewRegistration, PersistedId};
use serde::{Deserialize, Serialize};

/// A single submitted form value.
///
/// The form sends strings, but older clients send the student ID as a JSON
/// number and some send the interests as an array.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    Number(serde_json::Number),
    List(Vec<String>),
}

impl FieldValue {
    /// Trimmed scalar text, or `None` when blank or not a scalar.
    ///
    /// Numbers must be integral: `6401234`, `6401234.0` and `6.401234e6`
    /// all read as `"6401234"`, while `6401234.5` reads as missing.
    pub fn scalar(&self) -> Option<String> {
        let text = match self {
            FieldValue::Text(s) => s.trim().to_string(),
            FieldValue::Number(n) => integral_text(n)?,
            FieldValue::List(_) => return None,
        };
        (!text.is_empty()).then_some(text)
    }
}

/// Decimal text of an integral JSON number, without a fractional part.
pub(crate) fn integral_text(n: &serde_json::Number) -> Option<String> {
    if let Some(v) = n.as_u64() {
        return Some(v.to_string());
    }
    if let Some(v) = n.as_i64() {
        return Some(v.to_string());
    }
    n.as_f64()
        .filter(|f| f.is_finite() && f.fract() == 0.0)
        .map(|f| format!("{f:.0}"))
}

impl From<&str> for FieldValue {
    fn from(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }
}

/// Raw submission as received on the wire.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRegistration {
    pub aka: Option<FieldValue>,
    pub name: Option<FieldValue>,
    #[serde(alias = "studentId")]
    pub stuid: Option<FieldValue>,
    pub faculty: Option<FieldValue>,
    pub email: Option<FieldValue>,
    #[serde(alias = "discordName")]
    pub disname: Option<FieldValue>,
    pub level: Option<FieldValue>,
    #[serde(alias = "interests")]
    pub interested: Option<FieldValue>,
    pub experience: Option<FieldValue>,
}

/// A submission that passed validation, with every value trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NormalizedRegistration {
    pub aka: String,
    pub name: String,
    pub student_id: String,
    pub faculty: String,
    pub email: String,
    pub discord_name: String,
    pub level: String,
    pub interests: Vec<String>,
    pub experience: String,
}

impl NormalizedRegistration {
    /// Stamp the creation time and hand the record over to storage.
    pub fn into_new(self, created_at: DateTime<Utc>) -> NewRegistration {
        NewRegistration {
            aka: self.aka,
            name: self.name,
            student_id: self.student_id,
            faculty: self.faculty,
            email: self.email,
            discord_name: self.discord_name,
            level: self.level,
            interests: self.interests,
            experience: self.experience,
            created_at,
        }
    }
}

/// A committed registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Created {
    pub id: PersistedId,
    pub created_at: DateTime<Utc>,
}
