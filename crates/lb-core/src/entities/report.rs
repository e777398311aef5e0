use std::collections::HashMap;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Issue;
use crate::enums::Severity;

/// One uploaded analysis run: identifying metadata plus the issues in the
/// order the parser produced them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Hash)]
#[serde(default)]
pub struct Report {
    /// Surrogate id, `None` until the report has been stored.
    pub id: Option<i64>,
    /// Id of the tool that produced the report (e.g. `pmd`).
    pub tool_id: String,
    /// Display name of the tool.
    pub tool_name: String,
    /// Caller-supplied reference distinguishing uploads from the same tool.
    pub origin_report_file: String,
    pub issues: Vec<Issue>,
}

impl Report {
    #[must_use]
    pub fn new(
        tool_id: impl Into<String>,
        tool_name: impl Into<String>,
        origin_report_file: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            tool_id: tool_id.into(),
            tool_name: tool_name.into(),
            origin_report_file: origin_report_file.into(),
            issues: Vec::new(),
        }
    }

    /// Append issues, keeping their order.
    #[must_use]
    pub fn with_issues(mut self, issues: impl IntoIterator<Item = Issue>) -> Self {
        self.issues.extend(issues);
        self
    }

    pub fn push(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        self.issues.iter()
    }

    /// Total number of issues.
    #[must_use]
    pub fn size(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }

    /// Number of issues with the given severity.
    #[must_use]
    pub fn size_of(&self, severity: Severity) -> usize {
        self.issues
            .iter()
            .filter(|issue| issue.severity == severity)
            .count()
    }

    /// Count issues per distinct extracted value.
    ///
    /// Entries are returned in order of first occurrence while scanning the
    /// issues in their stored order; they are not sorted.
    pub fn property_count<F>(&self, extractor: F) -> Vec<(String, usize)>
    where
        F: Fn(&Issue) -> &str,
    {
        let mut counts: Vec<(String, usize)> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();
        for issue in &self.issues {
            let value = extractor(issue);
            if let Some(&slot) = index.get(value) {
                counts[slot].1 += 1;
            } else {
                index.insert(value, counts.len());
                counts.push((value.to_string(), 1));
            }
        }
        counts
    }

    /// Stamp the producing tool onto the report and every issue.
    pub fn set_origin(&mut self, tool_id: &str, tool_name: &str) {
        self.tool_id = tool_id.to_string();
        self.tool_name = tool_name.to_string();
        for issue in &mut self.issues {
            issue.origin = tool_id.to_string();
            issue.origin_name = tool_name.to_string();
        }
    }

    /// Stamp the upload reference onto the report and every issue.
    pub fn set_reference(&mut self, reference: &str) {
        self.origin_report_file = reference.to_string();
        for issue in &mut self.issues {
            issue.reference = reference.to_string();
        }
    }

    /// Copy of this report with all surrogate ids cleared, for comparing a
    /// stored report against the aggregate it was created from.
    #[must_use]
    pub fn without_ids(&self) -> Self {
        Self {
            id: None,
            tool_id: self.tool_id.clone(),
            tool_name: self.tool_name.clone(),
            origin_report_file: self.origin_report_file.clone(),
            issues: self.issues.iter().map(Issue::without_id).collect(),
        }
    }
}

impl<'a> IntoIterator for &'a Report {
    type Item = &'a Issue;
    type IntoIter = std::slice::Iter<'a, Issue>;

    fn into_iter(self) -> Self::IntoIter {
        self.issues.iter()
    }
}
