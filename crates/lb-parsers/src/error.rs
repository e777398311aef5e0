//! Parser error types for lb-parsers.

/// Errors raised while resolving a parser or reading a report.
#[derive(Debug, thiserror::Error)]
pub enum ParserError {
    #[error("No such tool found with id {0}")]
    UnknownTool(String),

    #[error("Parse failed for {tool_id}: {message}")]
    ParseFailed { tool_id: String, message: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
