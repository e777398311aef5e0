//! Report repository: cascade insert of a report with its issues, lookups by
//! id and by `(tool_id, origin_report_file)`, and bulk delete.

use std::collections::{HashMap, HashSet};

use lb_core::entities::Report;

use crate::entities::ReportEntity;
use crate::error::DatabaseError;
use crate::mapper;
use crate::repos::issue::{SELECT_COLS as ISSUE_COLS, insert_issue_row, row_to_issue_entity};
use crate::service::{EntityService, finish};

const SELECT_COLS: &str = "id, tool_id, tool_name, origin_report_file";

fn row_to_report_entity(row: &libsql::Row) -> Result<ReportEntity, DatabaseError> {
    Ok(ReportEntity {
        id: Some(row.get::<i64>(0)?),
        tool_id: row.get::<Option<String>>(1)?,
        tool_name: row.get::<Option<String>>(2)?,
        origin_report_file: row.get::<Option<String>>(3)?,
        issues: Vec::new(),
    })
}

/// Insert the report row, then every child issue in order, all on `conn`.
async fn insert_report_graph(
    conn: &libsql::Connection,
    entity: &mut ReportEntity,
) -> Result<i64, DatabaseError> {
    let report_id = conn
        .query(
            "INSERT INTO report (tool_id, tool_name, origin_report_file) VALUES (?1, ?2, ?3)
             RETURNING id",
            libsql::params![
                entity.tool_id.as_deref(),
                entity.tool_name.as_deref(),
                entity.origin_report_file.as_deref()
            ],
        )
        .await?
        .next()
        .await?
        .ok_or_else(|| anyhow::anyhow!("report insert returned no id"))?
        .get::<i64>(0)?;
    entity.assign_id(report_id);
    for (position, issue) in entity.issues.iter_mut().enumerate() {
        insert_issue_row(conn, issue, position).await?;
    }
    Ok(report_id)
}

/// Load reports matching `filter` (a SQL suffix such as `WHERE id = ?1`)
/// together with their issues in stored order.
async fn load_reports(
    conn: &libsql::Connection,
    filter: &str,
    params: Vec<libsql::Value>,
) -> Result<Vec<ReportEntity>, DatabaseError> {
    let mut rows = conn
        .query(
            &format!("SELECT {SELECT_COLS} FROM report {filter}"),
            libsql::params_from_iter(params),
        )
        .await?;

    let mut reports = Vec::new();
    while let Some(row) = rows.next().await? {
        reports.push(row_to_report_entity(&row)?);
    }
    attach_issues(conn, &mut reports).await?;
    Ok(reports)
}

/// Fill each report's `issues` from the `issue` table.
async fn attach_issues(
    conn: &libsql::Connection,
    reports: &mut [ReportEntity],
) -> Result<(), DatabaseError> {
    if let [report] = &mut *reports {
        let Some(report_id) = report.id else {
            return Ok(());
        };
        let mut rows = conn
            .query(
                &format!("SELECT {ISSUE_COLS} FROM issue WHERE report_id = ?1 ORDER BY position, id"),
                [report_id],
            )
            .await?;
        while let Some(row) = rows.next().await? {
            report.issues.push(row_to_issue_entity(&row)?);
        }
        return Ok(());
    }
    if reports.is_empty() {
        return Ok(());
    }

    let slots: HashMap<i64, usize> = reports
        .iter()
        .enumerate()
        .filter_map(|(slot, report)| report.id.map(|id| (id, slot)))
        .collect();
    let mut rows = conn
        .query(
            &format!(
                "SELECT {ISSUE_COLS} FROM issue WHERE report_id IS NOT NULL \
                 ORDER BY report_id, position, id"
            ),
            (),
        )
        .await?;
    while let Some(row) = rows.next().await? {
        let issue = row_to_issue_entity(&row)?;
        if let Some(&slot) = issue.report_id.as_ref().and_then(|id| slots.get(id)) {
            reports[slot].issues.push(issue);
        }
    }
    Ok(())
}

impl EntityService {
    /// Store a report and all of its issues in one transaction.
    ///
    /// The report row and every issue row are inserted together; if any
    /// insert fails nothing is stored. A fresh surrogate id is always
    /// assigned, so storing the same report twice yields two rows.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError::Mapping` if the report has no tool id, or
    /// another `DatabaseError` if an insert fails.
    pub async fn insert_report(&self, report: &Report) -> Result<Report, DatabaseError> {
        let mut entity = mapper::to_entity(report)?;

        let session = self.session().await?;
        let tx = session.begin_write().await?;
        let result = insert_report_graph(&tx, &mut entity).await;
        let report_id = finish(tx, result).await?;
        tracing::debug!(
            report_id,
            tool_id = %report.tool_id,
            origin_report_file = %report.origin_report_file,
            issues = entity.issues.len(),
            "inserted report"
        );

        Ok(mapper::to_report(&entity)?)
    }

    /// Load every stored report with its issues.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails or a row cannot be mapped.
    pub async fn select_all_reports(&self) -> Result<HashSet<Report>, DatabaseError> {
        let session = self.session().await?;
        let tx = session.begin_read().await?;
        let result = load_reports(&tx, "ORDER BY id", Vec::new()).await;
        let entities = finish(tx, result).await?;

        entities
            .iter()
            .map(|entity| mapper::to_report(entity).map_err(DatabaseError::from))
            .collect()
    }

    /// Look up one report by surrogate id. Returns `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails or a row cannot be mapped.
    pub async fn select_report(&self, id: i64) -> Result<Option<Report>, DatabaseError> {
        let session = self.session().await?;
        let tx = session.begin_read().await?;
        let result = load_reports(&tx, "WHERE id = ?1", vec![id.into()]).await;
        let entities = finish(tx, result).await?;

        entities
            .first()
            .map(mapper::to_report)
            .transpose()
            .map_err(DatabaseError::from)
    }

    /// Find the report previously uploaded for `tool_id` under
    /// `origin_report_file`. Returns `None` when there is no match.
    ///
    /// The pair is not unique; when it was uploaded more than once the most
    /// recent upload wins.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a query fails or a row cannot be mapped.
    pub async fn select_report_by_tool_id_and_origin_report_file(
        &self,
        tool_id: &str,
        origin_report_file: &str,
    ) -> Result<Option<Report>, DatabaseError> {
        let session = self.session().await?;
        let tx = session.begin_read().await?;
        let result = load_reports(
            &tx,
            "WHERE tool_id = ?1 AND origin_report_file = ?2 ORDER BY id DESC LIMIT 1",
            vec![tool_id.into(), origin_report_file.into()],
        )
        .await;
        let entities = finish(tx, result).await?;

        if entities.is_empty() {
            tracing::debug!(tool_id, origin_report_file, "no stored report for key");
        }
        entities
            .first()
            .map(mapper::to_report)
            .transpose()
            .map_err(DatabaseError::from)
    }

    /// Surrogate ids of all stored reports, ascending, as decimal strings.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails.
    pub async fn find_all_references(&self) -> Result<Vec<String>, DatabaseError> {
        let session = self.session().await?;
        let mut rows = session
            .conn()
            .query("SELECT id FROM report ORDER BY id", ())
            .await?;

        let mut references = Vec::new();
        while let Some(row) = rows.next().await? {
            references.push(row.get::<i64>(0)?.to_string());
        }
        Ok(references)
    }

    /// Delete every report and issue. Returns the number of reports removed.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if a delete fails; nothing is removed then.
    pub async fn delete_all(&self) -> Result<u64, DatabaseError> {
        let session = self.session().await?;
        let tx = session.begin_write().await?;
        let result = async {
            tx.execute("DELETE FROM issue", ()).await?;
            Ok::<_, DatabaseError>(tx.execute("DELETE FROM report", ()).await?)
        }
        .await;
        let removed = finish(tx, result).await?;
        tracing::debug!(removed, "deleted all reports");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MappingError;
    use crate::test_support::helpers::{count_rows, sample_report, test_service};
    use lb_core::enums::Severity;
    use pretty_assertions::assert_eq;

    #[tokio::test]
    async fn insert_report_assigns_ids_to_report_and_issues() {
        let svc = test_service().await;
        let report = sample_report("build-1");

        let stored = svc.insert_report(&report).await.unwrap();

        assert!(stored.id.is_some());
        assert!(stored.issues.iter().all(|issue| issue.id.is_some()));
        assert_eq!(stored.without_ids(), report);
        assert_eq!(count_rows(&svc, "report").await, 1);
        assert_eq!(count_rows(&svc, "issue").await, 3);
    }

    #[tokio::test]
    async fn select_report_roundtrip_keeps_order() {
        let svc = test_service().await;
        let stored = svc.insert_report(&sample_report("build-1")).await.unwrap();

        let fetched = svc.select_report(stored.id.unwrap()).await.unwrap().unwrap();

        assert_eq!(fetched, stored);
        let categories: Vec<&str> = fetched.iter().map(|i| i.category.as_str()).collect();
        assert_eq!(categories, ["Design", "Code Style", "Error Prone"]);
    }

    #[tokio::test]
    async fn select_missing_report_is_none() {
        let svc = test_service().await;
        assert_eq!(svc.select_report(77).await.unwrap(), None);
    }

    #[tokio::test]
    async fn lookup_by_tool_and_reference() {
        let svc = test_service().await;
        svc.insert_report(&sample_report("build-1")).await.unwrap();
        let second = svc.insert_report(&sample_report("build-2")).await.unwrap();

        let found = svc
            .select_report_by_tool_id_and_origin_report_file("pmd", "build-2")
            .await
            .unwrap();
        assert_eq!(found, Some(second));

        let missing = svc
            .select_report_by_tool_id_and_origin_report_file("checkstyle", "build-2")
            .await
            .unwrap();
        assert_eq!(missing, None);
    }

    #[tokio::test]
    async fn repeated_upload_keeps_both_and_lookup_returns_latest() {
        let svc = test_service().await;
        let first = svc.insert_report(&sample_report("same")).await.unwrap();
        let mut again = sample_report("same");
        again.issues.truncate(1);
        let second = svc.insert_report(&again).await.unwrap();

        assert_ne!(first.id, second.id);
        assert_eq!(svc.select_all_reports().await.unwrap().len(), 2);

        let found = svc
            .select_report_by_tool_id_and_origin_report_file("pmd", "same")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, second.id);
        assert_eq!(found.size(), 1);
    }

    #[tokio::test]
    async fn select_all_reports_keeps_children_with_their_parent() {
        let svc = test_service().await;
        let a = svc.insert_report(&sample_report("a")).await.unwrap();
        let empty = svc
            .insert_report(&Report::new("checkstyle", "CheckStyle", "b"))
            .await
            .unwrap();

        let all = svc.select_all_reports().await.unwrap();
        assert_eq!(all.len(), 2);
        assert!(all.contains(&a));
        assert!(all.contains(&empty));
    }

    #[tokio::test]
    async fn standalone_issues_do_not_leak_into_reports() {
        let svc = test_service().await;
        let report = svc.insert_report(&sample_report("a")).await.unwrap();
        svc.insert_issue(&crate::test_support::helpers::issue("Design", Severity::Error, 1))
            .await
            .unwrap();

        let fetched = svc.select_report(report.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(fetched.size(), 3);
        assert_eq!(svc.select_all_issues().await.unwrap().len(), 4);
    }

    #[tokio::test]
    async fn find_all_references_lists_report_ids() {
        let svc = test_service().await;
        let a = svc.insert_report(&sample_report("a")).await.unwrap();
        let b = svc.insert_report(&sample_report("b")).await.unwrap();

        let references = svc.find_all_references().await.unwrap();
        assert_eq!(
            references,
            vec![a.id.unwrap().to_string(), b.id.unwrap().to_string()]
        );
    }

    #[tokio::test]
    async fn blank_tool_id_fails_before_touching_the_store() {
        let svc = test_service().await;
        let report = Report::new("", "Nameless", "x.xml");

        let result = svc.insert_report(&report).await;

        assert!(matches!(
            result,
            Err(DatabaseError::Mapping(MappingError::MissingField("tool_id")))
        ));
        assert_eq!(count_rows(&svc, "report").await, 0);
    }

    #[tokio::test]
    async fn failed_child_insert_rolls_back_whole_report() {
        let svc = test_service().await;
        svc.db()
            .conn()
            .execute_batch(
                "CREATE TRIGGER reject_boom BEFORE INSERT ON issue
                 WHEN NEW.message = 'boom'
                 BEGIN SELECT RAISE(ABORT, 'rejected by test trigger'); END;",
            )
            .await
            .unwrap();

        let mut report = sample_report("atomic");
        report.issues[2].message = "boom".into();
        let result = svc.insert_report(&report).await;

        assert!(matches!(result, Err(DatabaseError::LibSql(_))));
        assert_eq!(count_rows(&svc, "report").await, 0);
        assert_eq!(count_rows(&svc, "issue").await, 0);

        // The connection is usable again after the rollback.
        report.issues[2].message = "fine".into();
        assert!(svc.insert_report(&report).await.is_ok());
    }

    #[tokio::test]
    async fn delete_all_removes_reports_and_issues() {
        let svc = test_service().await;
        svc.insert_report(&sample_report("a")).await.unwrap();
        svc.insert_report(&sample_report("b")).await.unwrap();
        svc.insert_issue(&crate::test_support::helpers::issue("Design", Severity::Error, 1))
            .await
            .unwrap();

        let removed = svc.delete_all().await.unwrap();

        assert_eq!(removed, 2);
        assert_eq!(count_rows(&svc, "report").await, 0);
        assert_eq!(count_rows(&svc, "issue").await, 0);
        assert!(svc.find_all_references().await.unwrap().is_empty());
    }
}
