//! Errors surfaced by the dashboard use cases.

use lb_db::error::DatabaseError;
use lb_parsers::ParserError;

/// Errors from [`crate::service::IssuesService`] operations.
///
/// Lookups that find nothing report `NotFound`; failures from the parser
/// registry and the store pass through unchanged.
#[derive(Debug, thiserror::Error)]
pub enum DashboardError {
    /// No stored report for the requested `(tool_id, reference)` key.
    #[error("No report found for tool '{tool_id}' and reference '{reference}'")]
    NotFound { tool_id: String, reference: String },

    /// The tool id is unknown or the uploaded content could not be parsed.
    #[error(transparent)]
    Parser(#[from] ParserError),

    /// Reading from or writing to the report store failed.
    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn not_found_names_the_key() {
        let err = DashboardError::NotFound {
            tool_id: "pmd".into(),
            reference: "build-7".into(),
        };
        assert_eq!(
            err.to_string(),
            "No report found for tool 'pmd' and reference 'build-7'"
        );
    }

    #[test]
    fn parser_errors_pass_through() {
        let err = DashboardError::from(ParserError::UnknownTool("eslint".into()));
        assert!(matches!(err, DashboardError::Parser(ParserError::UnknownTool(_))));
        assert_eq!(err.to_string(), "No such tool found with id eslint");
    }
}
