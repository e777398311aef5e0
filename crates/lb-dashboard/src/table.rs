//! Summary table with one statistics row per report.

use lb_core::entities::Report;
use lb_core::enums::Severity;
use lb_core::responses::IssuesTable;

/// Build one row per report, in the order given:
/// `[tool_id, tool_name, origin_report_file, total, error, high, normal, low]`.
///
/// Counts are rendered as decimal strings.
pub fn summary_table<'a>(reports: impl IntoIterator<Item = &'a Report>) -> IssuesTable {
    let mut table = IssuesTable::default();
    for report in reports {
        table.push_row(summary_row(report));
    }
    table
}

fn summary_row(report: &Report) -> Vec<String> {
    let mut row = vec![
        report.tool_id.clone(),
        report.tool_name.clone(),
        report.origin_report_file.clone(),
        report.size().to_string(),
    ];
    row.extend(
        Severity::ALL
            .into_iter()
            .map(|severity| report.size_of(severity).to_string()),
    );
    row
}

#[cfg(test)]
mod tests {
    use super::*;
    use lb_core::entities::IssueBuilder;
    use pretty_assertions::assert_eq;

    fn with_severity(severity: Severity) -> lb_core::entities::Issue {
        IssueBuilder::new().category("Design").severity(severity).build()
    }

    #[test]
    fn two_report_table() {
        let empty = Report::new("1", "emptyReport", "path1");
        let full = Report::new("2", "fullReport", "path2").with_issues([
            with_severity(Severity::WarningHigh),
            with_severity(Severity::WarningNormal),
            with_severity(Severity::WarningLow),
        ]);

        let table = summary_table([&empty, &full]);

        assert_eq!(
            serde_json::to_string(&table).unwrap(),
            r#"{"data":[["1","emptyReport","path1","0","0","0","0","0"],["2","fullReport","path2","3","0","1","1","1"]]}"#
        );
    }

    #[test]
    fn rows_follow_input_order() {
        let a = Report::new("a", "A", "x");
        let b = Report::new("b", "B", "y");

        let table = summary_table([&b, &a]);

        assert_eq!(table.data[0][0], "b");
        assert_eq!(table.data[1][0], "a");
    }

    #[test]
    fn error_column_counts_errors() {
        let report = Report::new("pmd", "PMD", "r")
            .with_issues([with_severity(Severity::Error), with_severity(Severity::Error)]);
        let table = summary_table([&report]);
        assert_eq!(table.data[0][3..], ["2", "2", "0", "0", "0"]);
    }

    #[test]
    fn no_reports_no_rows() {
        let table = summary_table(std::iter::empty());
        assert!(table.is_empty());
        assert_eq!(serde_json::to_string(&table).unwrap(), r#"{"data":[]}"#);
    }
}
