//! Member storage errors.

use crate::types::{DuplicateFields, UniqueField};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Duplicate member ({0})")]
    Duplicate(DuplicateFields),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn is_duplicate(&self) -> bool {
        matches!(self, StoreError::Duplicate(_))
    }
}

impl From<rusqlite::Error> for StoreError {
    fn from(e: rusqlite::Error) -> Self {
        match &e {
            rusqlite::Error::SqliteFailure(failure, message)
                if failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
                    || failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
            {
                StoreError::Duplicate(parse_unique_violation(message.as_deref()))
            }
            _ => StoreError::Backend(e.to_string()),
        }
    }
}

impl From<tokio::task::JoinError> for StoreError {
    fn from(e: tokio::task::JoinError) -> Self {
        StoreError::Backend(format!("Storage task failed: {}", e))
    }
}

/// Extract the colliding columns from a SQLite uniqueness message such as
/// `UNIQUE constraint failed: members.student_id, members.email`.
pub(crate) fn parse_unique_violation(message: Option<&str>) -> DuplicateFields {
    let Some(columns) = message.and_then(|m| m.split_once("constraint failed:")) else {
        return DuplicateFields::unspecified();
    };

    DuplicateFields::of(columns.1.split(',').filter_map(|qualified| {
        let column = qualified.trim().rsplit('.').next()?;
        UniqueField::from_column(column)
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_single_column() {
        let fields = parse_unique_violation(Some("UNIQUE constraint failed: members.student_id"));
        assert_eq!(fields.fields(), &[UniqueField::StudentId]);
    }

    #[test]
    fn test_parse_multiple_columns() {
        let fields = parse_unique_violation(Some(
            "UNIQUE constraint failed: members.email, members.student_id",
        ));
        assert!(fields.contains(UniqueField::Email));
        assert!(fields.contains(UniqueField::StudentId));
    }

    #[test]
    fn test_parse_unknown_message() {
        assert!(parse_unique_violation(None).is_unspecified());
        assert!(parse_unique_violation(Some("database is locked")).is_unspecified());
        assert!(
            parse_unique_violation(Some("UNIQUE constraint failed: members.id")).is_unspecified()
        );
    }

    #[test]
    fn test_other_sqlite_errors_are_backend_errors() {
        let err = StoreError::from(rusqlite::Error::QueryReturnedNoRows);
        assert!(matches!(err, StoreError::Backend(_)));
        assert!(!err.is_duplicate());
    }
}
