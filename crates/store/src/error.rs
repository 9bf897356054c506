//! Store error type and SQLite constraint classification.

use bookstore_schema::ValidationError;

/// Error returned by every store operation.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum StoreError {
    /// Input rejected before reaching the database.
    #[error("{0}")]
    InvalidInput(String),

    /// The referenced row does not exist (or is soft-deleted).
    #[error("{0}")]
    NotFound(String),

    /// The operation collides with an existing row or is blocked by a
    /// RESTRICT foreign key.
    #[error("{0}")]
    Conflict(String),

    #[error("{0}")]
    Internal(String),

    /// Unclassified database error.
    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),
}

impl From<ValidationError> for StoreError {
    fn from(e: ValidationError) -> Self {
        Self::InvalidInput(e.0)
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;

/// Which constraint a failed statement tripped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ConstraintKind {
    PrimaryKey,
    Unique,
    ForeignKey,
    Check,
    Other,
}

// SQLite extended result codes.
const SQLITE_CONSTRAINT_CHECK: i32 = 275;
const SQLITE_CONSTRAINT_FOREIGNKEY: i32 = 787;
// RESTRICT actions are implemented with internal triggers, so SQLite reports
// them as SQLITE_CONSTRAINT_TRIGGER rather than SQLITE_CONSTRAINT_FOREIGNKEY.
const SQLITE_CONSTRAINT_TRIGGER: i32 = 1811;
const SQLITE_CONSTRAINT_PRIMARYKEY: i32 = 1555;
const SQLITE_CONSTRAINT_UNIQUE: i32 = 2067;

/// Classify a rusqlite error as a constraint violation, if it is one.
pub(crate) fn constraint_kind(e: &rusqlite::Error) -> Option<ConstraintKind> {
    match e {
        rusqlite::Error::SqliteFailure(f, _)
            if f.code == rusqlite::ErrorCode::ConstraintViolation =>
        {
            Some(match f.extended_code {
                SQLITE_CONSTRAINT_PRIMARYKEY => ConstraintKind::PrimaryKey,
                SQLITE_CONSTRAINT_UNIQUE => ConstraintKind::Unique,
                SQLITE_CONSTRAINT_FOREIGNKEY | SQLITE_CONSTRAINT_TRIGGER => {
                    ConstraintKind::ForeignKey
                }
                SQLITE_CONSTRAINT_CHECK => ConstraintKind::Check,
                _ => ConstraintKind::Other,
            })
        }
        _ => None,
    }
}

/// Map a RESTRICT foreign-key failure to `Conflict`, pass anything else through.
pub(crate) fn map_fk_conflict(e: rusqlite::Error, msg: &str) -> StoreError {
    match constraint_kind(&e) {
        Some(ConstraintKind::ForeignKey) => StoreError::Conflict(msg.to_string()),
        _ => StoreError::Sqlite(e),
    }
}

/// Map a duplicate-key failure to `Conflict` and a missing-parent failure to
/// `NotFound`, pass anything else through.
pub(crate) fn map_insert_err(e: rusqlite::Error, dup_msg: &str, missing_msg: &str) -> StoreError {
    match constraint_kind(&e) {
        Some(ConstraintKind::PrimaryKey) | Some(ConstraintKind::Unique) => {
            StoreError::Conflict(dup_msg.to_string())
        }
        Some(ConstraintKind::ForeignKey) => StoreError::NotFound(missing_msg.to_string()),
        _ => StoreError::Sqlite(e),
    }
}
