//! Row-shaped entities for the `report` and `issue` tables.
//!
//! Text columns are `Option<String>` because the schema allows NULL for most
//! of them; integer positions are `i64` as stored. The owning report of an
//! issue is a plain `report_id` value, never a reference back into the
//! parent entity.

use serde::{Deserialize, Serialize};

/// Persisted shadow of a [`lb_core::entities::Report`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportEntity {
    pub id: Option<i64>,
    pub tool_id: Option<String>,
    pub tool_name: Option<String>,
    pub origin_report_file: Option<String>,
    /// Child issues in stored order. Owned exclusively by this report.
    pub issues: Vec<IssueEntity>,
}

impl ReportEntity {
    /// Append a child issue, pointing its `report_id` at this report.
    pub fn add_issue_entity(&mut self, mut issue: IssueEntity) -> &IssueEntity {
        issue.report_id = self.id;
        self.issues.push(issue);
        let last = self.issues.len() - 1;
        &self.issues[last]
    }

    /// Record the surrogate id assigned on insert and propagate it to every
    /// child's `report_id`.
    pub fn assign_id(&mut self, id: i64) {
        self.id = Some(id);
        for issue in &mut self.issues {
            issue.report_id = Some(id);
        }
    }
}

/// Persisted shadow of a [`lb_core::entities::Issue`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueEntity {
    pub id: Option<i64>,
    /// Owning report; `None` for issues stored on their own.
    pub report_id: Option<i64>,
    pub category: Option<String>,
    pub issue_type: Option<String>,
    /// Severity name (`ERROR`, `HIGH`, `NORMAL`, `LOW`).
    pub severity: Option<String>,
    pub message: Option<String>,
    pub description: Option<String>,
    pub file_name: Option<String>,
    pub module_name: Option<String>,
    pub package_name: Option<String>,
    pub origin: Option<String>,
    pub origin_name: Option<String>,
    pub fingerprint: Option<String>,
    pub reference: Option<String>,
    pub column_start: i64,
    pub column_end: i64,
    pub line_start: i64,
    pub line_end: i64,
}
