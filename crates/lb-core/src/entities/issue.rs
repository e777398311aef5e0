use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::enums::Severity;

/// A single static-analysis finding: one rule violation at one location.
///
/// Line and column positions are 1-based; `0` means unknown.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Issue {
    /// Surrogate id, `None` until the issue has been stored.
    pub id: Option<i64>,
    pub category: String,
    #[serde(rename = "type")]
    pub issue_type: String,
    pub severity: Severity,
    pub message: String,
    pub description: String,
    pub file_name: String,
    pub module_name: String,
    pub package_name: String,
    pub line_start: u32,
    pub line_end: u32,
    pub column_start: u32,
    pub column_end: u32,
    /// Deduplication key computed by the producing tool. May be empty.
    pub fingerprint: String,
    /// Id of the tool that reported the issue (e.g. `pmd`).
    pub origin: String,
    /// Display name of the tool that reported the issue.
    pub origin_name: String,
    /// Caller-supplied reference of the upload this issue came from.
    pub reference: String,
}

impl Issue {
    /// Swap reversed `start`/`end` pairs so that `end >= start` whenever both
    /// are set.
    #[must_use]
    pub fn normalized(mut self) -> Self {
        if self.line_start > 0 && self.line_end > 0 && self.line_end < self.line_start {
            let start = self.line_end;
            self.line_end = self.line_start;
            self.line_start = start;
        }
        if self.column_start > 0 && self.column_end > 0 && self.column_end < self.column_start {
            let start = self.column_end;
            self.column_end = self.column_start;
            self.column_start = start;
        }
        self
    }

    /// Copy of this issue without its surrogate id.
    #[must_use]
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }
}

/// Fluent builder for [`Issue`] with empty-string defaults and
/// `NORMAL` severity.
#[derive(Debug, Clone, Default)]
pub struct IssueBuilder {
    issue: Issue,
}

impl IssueBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn id(mut self, id: i64) -> Self {
        self.issue.id = Some(id);
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.issue.category = category.into();
        self
    }

    #[must_use]
    pub fn issue_type(mut self, issue_type: impl Into<String>) -> Self {
        self.issue.issue_type = issue_type.into();
        self
    }

    #[must_use]
    pub fn severity(mut self, severity: Severity) -> Self {
        self.issue.severity = severity;
        self
    }

    #[must_use]
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.issue.message = message.into();
        self
    }

    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.issue.description = description.into();
        self
    }

    #[must_use]
    pub fn file_name(mut self, file_name: impl Into<String>) -> Self {
        self.issue.file_name = file_name.into();
        self
    }

    #[must_use]
    pub fn module_name(mut self, module_name: impl Into<String>) -> Self {
        self.issue.module_name = module_name.into();
        self
    }

    #[must_use]
    pub fn package_name(mut self, package_name: impl Into<String>) -> Self {
        self.issue.package_name = package_name.into();
        self
    }

    #[must_use]
    pub fn line_start(mut self, line: u32) -> Self {
        self.issue.line_start = line;
        self
    }

    #[must_use]
    pub fn line_end(mut self, line: u32) -> Self {
        self.issue.line_end = line;
        self
    }

    #[must_use]
    pub fn column_start(mut self, column: u32) -> Self {
        self.issue.column_start = column;
        self
    }

    #[must_use]
    pub fn column_end(mut self, column: u32) -> Self {
        self.issue.column_end = column;
        self
    }

    #[must_use]
    pub fn fingerprint(mut self, fingerprint: impl Into<String>) -> Self {
        self.issue.fingerprint = fingerprint.into();
        self
    }

    #[must_use]
    pub fn origin(mut self, origin: impl Into<String>, origin_name: impl Into<String>) -> Self {
        self.issue.origin = origin.into();
        self.issue.origin_name = origin_name.into();
        self
    }

    #[must_use]
    pub fn reference(mut self, reference: impl Into<String>) -> Self {
        self.issue.reference = reference.into();
        self
    }

    #[must_use]
    pub fn build(self) -> Issue {
        self.issue.normalized()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_defaults() {
        let issue = IssueBuilder::new().build();
        assert_eq!(issue.id, None);
        assert_eq!(issue.severity, Severity::WarningNormal);
        assert!(issue.category.is_empty());
        assert!(issue.fingerprint.is_empty());
        assert_eq!(issue.line_start, 0);
        assert_eq!(issue.column_end, 0);
    }

    #[test]
    fn builder_swaps_reversed_ranges() {
        let issue = IssueBuilder::new()
            .line_start(12)
            .line_end(4)
            .column_start(30)
            .column_end(2)
            .build();
        assert_eq!((issue.line_start, issue.line_end), (4, 12));
        assert_eq!((issue.column_start, issue.column_end), (2, 30));
    }

    #[test]
    fn unknown_end_is_left_alone() {
        let issue = IssueBuilder::new().line_start(7).build();
        assert_eq!((issue.line_start, issue.line_end), (7, 0));
    }

    #[test]
    fn type_serializes_as_type() {
        let issue = IssueBuilder::new().issue_type("UnusedPrivateField").build();
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(json["type"], "UnusedPrivateField");
        assert!(json.get("issue_type").is_none());
    }

    #[test]
    fn missing_fields_deserialize_to_defaults() {
        let issue: Issue = serde_json::from_str(r#"{"category":"Design","severity":"HIGH"}"#).unwrap();
        assert_eq!(issue.category, "Design");
        assert_eq!(issue.severity, Severity::WarningHigh);
        assert!(issue.message.is_empty());
        assert_eq!(issue.id, None);
    }
}
