//! Cross-cutting error types for Lintboard.
//!
//! Domain-specific errors (e.g., `DatabaseError`, `ParserError`) are defined in
//! their respective crates and converge in `lb-dashboard` and `lb-cli`.

use thiserror::Error;

/// Errors raised when parsing model values from strings.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A stored or supplied severity name is not one of the known levels.
    #[error("Invalid severity: '{0}' (expected ERROR, HIGH, NORMAL or LOW)")]
    InvalidSeverity(String),

    /// The requested issue property cannot be used for grouping.
    #[error("Unknown issue property: '{0}'")]
    UnknownProperty(String),
}
