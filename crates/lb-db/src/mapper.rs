//! Conversion between the report model and its stored entities.
//!
//! Pure functions, no I/O. Issue order is preserved in both directions; the
//! statistics table and the chart label order depend on it.

use lb_core::entities::{Issue, Report};
use lb_core::enums::Severity;

use crate::entities::{IssueEntity, ReportEntity};
use crate::error::MappingError;

/// Convert a report and all of its issues into an entity graph.
///
/// Child entities carry the report's id as `report_id` (`None` until the
/// report is inserted).
///
/// # Errors
///
/// Returns `MappingError::MissingField` if the report has a blank tool id.
pub fn to_entity(report: &Report) -> Result<ReportEntity, MappingError> {
    if report.tool_id.trim().is_empty() {
        return Err(MappingError::MissingField("tool_id"));
    }

    let mut entity = ReportEntity {
        id: report.id,
        tool_id: Some(report.tool_id.clone()),
        tool_name: Some(report.tool_name.clone()),
        origin_report_file: Some(report.origin_report_file.clone()),
        issues: Vec::with_capacity(report.size()),
    };
    for issue in report {
        entity.add_issue_entity(issue_to_entity(issue));
    }
    Ok(entity)
}

/// Convert a single issue. The severity is stored by name.
#[must_use]
pub fn issue_to_entity(issue: &Issue) -> IssueEntity {
    IssueEntity {
        id: issue.id,
        report_id: None,
        category: Some(issue.category.clone()),
        issue_type: Some(issue.issue_type.clone()),
        severity: Some(issue.severity.as_str().to_string()),
        message: Some(issue.message.clone()),
        description: Some(issue.description.clone()),
        file_name: Some(issue.file_name.clone()),
        module_name: Some(issue.module_name.clone()),
        package_name: Some(issue.package_name.clone()),
        origin: Some(issue.origin.clone()),
        origin_name: Some(issue.origin_name.clone()),
        fingerprint: Some(issue.fingerprint.clone()),
        reference: Some(issue.reference.clone()),
        column_start: i64::from(issue.column_start),
        column_end: i64::from(issue.column_end),
        line_start: i64::from(issue.line_start),
        line_end: i64::from(issue.line_end),
    }
}

/// Rebuild a report from its entity graph with a fresh issue list.
///
/// # Errors
///
/// Returns `MappingError` if the tool id is missing or any child issue fails
/// to convert.
pub fn to_report(entity: &ReportEntity) -> Result<Report, MappingError> {
    let tool_id = entity
        .tool_id
        .clone()
        .filter(|id| !id.trim().is_empty())
        .ok_or(MappingError::MissingField("tool_id"))?;

    let issues = entity
        .issues
        .iter()
        .map(to_issue)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Report {
        id: entity.id,
        tool_id,
        tool_name: entity.tool_name.clone().unwrap_or_default(),
        origin_report_file: entity.origin_report_file.clone().unwrap_or_default(),
        issues,
    })
}

/// Rebuild a single issue, parsing the severity back from its name.
///
/// # Errors
///
/// Returns `MappingError::MissingField` for a NULL category or severity,
/// `MappingError::InvalidSeverity` for an unknown severity name and
/// `MappingError::InvalidValue` for negative or oversized positions.
pub fn to_issue(entity: &IssueEntity) -> Result<Issue, MappingError> {
    let category = entity
        .category
        .clone()
        .ok_or(MappingError::MissingField("category"))?;
    let severity_name = entity
        .severity
        .as_deref()
        .ok_or(MappingError::MissingField("severity"))?;
    let severity: Severity = severity_name
        .parse()
        .map_err(|_| MappingError::InvalidSeverity(severity_name.to_string()))?;

    Ok(Issue {
        id: entity.id,
        category,
        issue_type: entity.issue_type.clone().unwrap_or_default(),
        severity,
        message: entity.message.clone().unwrap_or_default(),
        description: entity.description.clone().unwrap_or_default(),
        file_name: entity.file_name.clone().unwrap_or_default(),
        module_name: entity.module_name.clone().unwrap_or_default(),
        package_name: entity.package_name.clone().unwrap_or_default(),
        line_start: position("line_start", entity.line_start)?,
        line_end: position("line_end", entity.line_end)?,
        column_start: position("column_start", entity.column_start)?,
        column_end: position("column_end", entity.column_end)?,
        fingerprint: entity.fingerprint.clone().unwrap_or_default(),
        origin: entity.origin.clone().unwrap_or_default(),
        origin_name: entity.origin_name.clone().unwrap_or_default(),
        reference: entity.reference.clone().unwrap_or_default(),
    })
}

fn position(field: &'static str, value: i64) -> Result<u32, MappingError> {
    u32::try_from(value).map_err(|_| MappingError::InvalidValue { field, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lb_core::entities::IssueBuilder;
    use pretty_assertions::assert_eq;

    fn issue(message: &str, file: &str, severity: Severity) -> Issue {
        IssueBuilder::new()
            .message(message)
            .file_name(file)
            .severity(severity)
            .build()
    }

    fn sample_report() -> Report {
        Report::new("id", "Name", "origin.xml").with_issues([
            issue("issue-1", "file-1", Severity::WarningHigh),
            issue("issue-2", "file-1", Severity::WarningNormal),
            issue("issue-3", "file-1", Severity::WarningNormal),
            issue("issue-4", "file-2", Severity::WarningLow),
            issue("issue-5", "file-2", Severity::WarningLow),
            issue("issue-6", "file-3", Severity::WarningLow),
        ])
    }

    #[test]
    fn report_to_entity_copies_metadata() {
        let entity = to_entity(&sample_report()).unwrap();
        assert_eq!(entity.tool_id.as_deref(), Some("id"));
        assert_eq!(entity.tool_name.as_deref(), Some("Name"));
        assert_eq!(entity.origin_report_file.as_deref(), Some("origin.xml"));
        assert_eq!(entity.issues.len(), 6);
        assert_eq!(entity.issues[0].severity.as_deref(), Some("HIGH"));
        assert_eq!(entity.issues[5].file_name.as_deref(), Some("file-3"));
    }

    #[test]
    fn report_round_trip_preserves_order_and_fields() {
        let report = sample_report();
        let result = to_report(&to_entity(&report).unwrap()).unwrap();

        assert_eq!(result, report);
        assert_eq!(result.size_of(Severity::WarningLow), 3);
        assert_eq!(result.size_of(Severity::WarningNormal), 2);
        assert_eq!(result.size_of(Severity::WarningHigh), 1);
        let messages: Vec<&str> = result.iter().map(|i| i.message.as_str()).collect();
        assert_eq!(
            messages,
            ["issue-1", "issue-2", "issue-3", "issue-4", "issue-5", "issue-6"]
        );
    }

    #[test]
    fn issue_round_trip_keeps_every_field() {
        let original = IssueBuilder::new()
            .id(9)
            .category("Code Style")
            .issue_type("MethodArgumentCouldBeFinal")
            .severity(Severity::Error)
            .message("Parameter 'builder' is not assigned")
            .description("<p>details</p>")
            .file_name("QualityGateTest.java")
            .module_name("analysis-core")
            .package_name("io.jenkins.plugins.analysis.core.quality")
            .line_start(300)
            .line_end(300)
            .column_start(32)
            .column_end(81)
            .fingerprint("abc123")
            .origin("pmd", "PMD")
            .reference("build-7")
            .build();

        assert_eq!(to_issue(&issue_to_entity(&original)).unwrap(), original);
    }

    #[test]
    fn empty_report_round_trips() {
        let report = Report::new("pmd", "PMD", "empty.xml");
        let entity = to_entity(&report).unwrap();
        assert!(entity.issues.is_empty());
        assert_eq!(to_report(&entity).unwrap(), report);
    }

    #[test]
    fn blank_tool_id_is_rejected() {
        let report = Report::new("  ", "PMD", "a.xml");
        assert_eq!(
            to_entity(&report).unwrap_err(),
            MappingError::MissingField("tool_id")
        );

        let entity = ReportEntity::default();
        assert_eq!(
            to_report(&entity).unwrap_err(),
            MappingError::MissingField("tool_id")
        );
    }

    #[test]
    fn null_category_or_severity_is_rejected() {
        let mut entity = issue_to_entity(&IssueBuilder::new().build());
        entity.category = None;
        assert_eq!(
            to_issue(&entity).unwrap_err(),
            MappingError::MissingField("category")
        );

        let mut entity = issue_to_entity(&IssueBuilder::new().build());
        entity.severity = None;
        assert_eq!(
            to_issue(&entity).unwrap_err(),
            MappingError::MissingField("severity")
        );
    }

    #[test]
    fn unknown_severity_name_is_rejected() {
        let mut entity = issue_to_entity(&IssueBuilder::new().build());
        entity.severity = Some("WARNING_HIGH".into());
        assert_eq!(
            to_issue(&entity).unwrap_err(),
            MappingError::InvalidSeverity("WARNING_HIGH".into())
        );
    }

    #[test]
    fn negative_position_is_rejected() {
        let mut entity = issue_to_entity(&IssueBuilder::new().build());
        entity.line_end = -1;
        assert_eq!(
            to_issue(&entity).unwrap_err(),
            MappingError::InvalidValue {
                field: "line_end",
                value: -1
            }
        );
    }

    #[test]
    fn null_optional_text_maps_to_empty() {
        let entity = IssueEntity {
            category: Some("Design".into()),
            severity: Some("LOW".into()),
            ..Default::default()
        };
        let issue = to_issue(&entity).unwrap();
        assert!(issue.message.is_empty());
        assert!(issue.fingerprint.is_empty());
        assert_eq!(issue.severity, Severity::WarningLow);
    }
}
