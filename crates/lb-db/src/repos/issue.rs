//! Issue repository: stand-alone inserts and point/bulk selects.

use std::collections::HashSet;

use lb_core::entities::Issue;

use crate::entities::IssueEntity;
use crate::error::DatabaseError;
use crate::mapper;
use crate::service::{EntityService, finish};

pub(crate) const SELECT_COLS: &str = "id, report_id, category, type, severity, message, description, \
     file_name, module_name, package_name, origin, origin_name, fingerprint, reference, \
     column_start, column_end, line_start, line_end";

pub(crate) fn row_to_issue_entity(row: &libsql::Row) -> Result<IssueEntity, DatabaseError> {
    Ok(IssueEntity {
        id: Some(row.get::<i64>(0)?),
        report_id: row.get::<Option<i64>>(1)?,
        category: row.get::<Option<String>>(2)?,
        issue_type: row.get::<Option<String>>(3)?,
        severity: row.get::<Option<String>>(4)?,
        message: row.get::<Option<String>>(5)?,
        description: row.get::<Option<String>>(6)?,
        file_name: row.get::<Option<String>>(7)?,
        module_name: row.get::<Option<String>>(8)?,
        package_name: row.get::<Option<String>>(9)?,
        origin: row.get::<Option<String>>(10)?,
        origin_name: row.get::<Option<String>>(11)?,
        fingerprint: row.get::<Option<String>>(12)?,
        reference: row.get::<Option<String>>(13)?,
        column_start: row.get::<i64>(14)?,
        column_end: row.get::<i64>(15)?,
        line_start: row.get::<i64>(16)?,
        line_end: row.get::<i64>(17)?,
    })
}

/// Insert one issue row and record the assigned id on `entity`.
///
/// Any id already present on `entity` is ignored; a fresh id is always
/// assigned and read back from the insert itself.
pub(crate) async fn insert_issue_row(
    conn: &libsql::Connection,
    entity: &mut IssueEntity,
    position: usize,
) -> Result<i64, DatabaseError> {
    let position = i64::try_from(position).map_err(|e| DatabaseError::Other(e.into()))?;
    let mut rows = conn
        .query(
            "INSERT INTO issue (report_id, position, category, type, severity, message, description, \
             file_name, module_name, package_name, origin, origin_name, fingerprint, reference, \
             column_start, column_end, line_start, line_end)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
             RETURNING id",
            libsql::params![
                entity.report_id,
                position,
                entity.category.as_deref(),
                entity.issue_type.as_deref(),
                entity.severity.as_deref(),
                entity.message.as_deref(),
                entity.description.as_deref(),
                entity.file_name.as_deref(),
                entity.module_name.as_deref(),
                entity.package_name.as_deref(),
                entity.origin.as_deref(),
                entity.origin_name.as_deref(),
                entity.fingerprint.as_deref(),
                entity.reference.as_deref(),
                entity.column_start,
                entity.column_end,
                entity.line_start,
                entity.line_end
            ],
        )
        .await?;

    let id = rows
        .next()
        .await?
        .ok_or_else(|| anyhow::anyhow!("issue insert returned no id"))?
        .get::<i64>(0)?;
    entity.id = Some(id);
    Ok(id)
}

impl EntityService {
    /// Store a single issue that does not belong to any report.
    ///
    /// Returns a new copy with the assigned surrogate id; the input is not
    /// modified.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the insert violates a constraint or fails.
    pub async fn insert_issue(&self, issue: &Issue) -> Result<Issue, DatabaseError> {
        let mut entity = mapper::issue_to_entity(issue);

        let session = self.session().await?;
        let tx = session.begin_write().await?;
        let result = insert_issue_row(&tx, &mut entity, 0).await;
        let id = finish(tx, result).await?;
        tracing::debug!(issue_id = id, "inserted issue");

        Ok(mapper::to_issue(&entity)?)
    }

    /// Load every stored issue, including those owned by reports.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or a row cannot be mapped.
    pub async fn select_all_issues(&self) -> Result<HashSet<Issue>, DatabaseError> {
        let session = self.session().await?;
        let mut rows = session
            .conn()
            .query(&format!("SELECT {SELECT_COLS} FROM issue ORDER BY id"), ())
            .await?;

        let mut issues = HashSet::new();
        while let Some(row) = rows.next().await? {
            issues.insert(mapper::to_issue(&row_to_issue_entity(&row)?)?);
        }
        Ok(issues)
    }

    /// Look up one issue by surrogate id. Returns `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the query fails or the row cannot be mapped.
    pub async fn select_issue(&self, id: i64) -> Result<Option<Issue>, DatabaseError> {
        let session = self.session().await?;
        let mut rows = session
            .conn()
            .query(
                &format!("SELECT {SELECT_COLS} FROM issue WHERE id = ?1"),
                [id],
            )
            .await?;

        match rows.next().await? {
            Some(row) => Ok(Some(mapper::to_issue(&row_to_issue_entity(&row)?)?)),
            None => Ok(None),
        }
    }
}
