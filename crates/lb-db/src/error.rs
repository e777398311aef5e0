//! Database and mapping error types for lb-db.

use thiserror::Error;

/// Errors from database operations.
///
/// Constraint violations and I/O failures surface as `LibSql`; they are never
/// retried here.
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Schema migration failed.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// Converting between a report and its stored entities failed.
    #[error("Mapping failed: {0}")]
    Mapping(#[from] MappingError),

    /// Underlying libSQL error.
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// Catch-all for unexpected errors.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A report or issue could not be converted to or from its entity form.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MappingError {
    /// A field the schema declares `NOT NULL` is missing or blank.
    #[error("required field '{0}' is missing")]
    MissingField(&'static str),

    /// A stored severity name is not one of the known levels.
    #[error("invalid severity '{0}'")]
    InvalidSeverity(String),

    /// A stored value is out of range for the model type.
    #[error("invalid value {value} for '{field}'")]
    InvalidValue { field: &'static str, value: i64 },
}
