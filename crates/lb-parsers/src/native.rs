//! Built-in parser for Lintboard's own JSON issue format.
//!
//! Accepts either a bare array of issues or a report object with an
//! `issues` array. Issue fields use the same names as the JSON form of
//! [`lb_core::entities::Issue`]; missing fields take the model defaults.

use std::io::Read;

use lb_core::entities::{Issue, Report};
use serde::Deserialize;

use crate::error::ParserError;
use crate::parser::Parser;

/// Tool id the native format is registered under.
pub const NATIVE_TOOL_ID: &str = "issues";
/// Display name of the native format.
pub const NATIVE_TOOL_NAME: &str = "Native Issues Format";

#[derive(Deserialize)]
#[serde(untagged)]
enum NativeDocument {
    List(Vec<Issue>),
    Report { issues: Vec<Issue> },
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NativeJsonParser;

impl Parser for NativeJsonParser {
    fn parse(&self, reader: &mut dyn Read) -> Result<Report, ParserError> {
        let mut content = Vec::new();
        reader.read_to_end(&mut content)?;
        if content.iter().all(u8::is_ascii_whitespace) {
            return Err(ParserError::ParseFailed {
                tool_id: NATIVE_TOOL_ID.to_string(),
                message: "report is empty".to_string(),
            });
        }

        let issues = match serde_json::from_slice(&content)? {
            NativeDocument::List(issues) | NativeDocument::Report { issues } => issues,
        };
        tracing::debug!(issues = issues.len(), "parsed native report");

        // Stored ids belong to the database that produced the export.
        Ok(Report::default().with_issues(
            issues
                .into_iter()
                .map(|issue| Issue { id: None, ..issue }.normalized()),
        ))
    }
}
