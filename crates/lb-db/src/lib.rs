//! # lb-db
//!
//! libSQL persistence for Lintboard reports.
//!
//! Stores uploaded reports and their issues in two tables (`report`, `issue`)
//! and converts between the in-memory [`lb_core::entities::Report`] graph and
//! the row-shaped entities in [`entities`]. [`service::EntityService`] is the
//! single point of access; each of its public operations runs in one
//! transaction.

pub mod entities;
pub mod error;
pub mod mapper;
mod migrations;
pub mod repos;
pub mod service;
mod test_support;

use error::DatabaseError;
use libsql::Builder;
use tokio::sync::{Mutex, MutexGuard};

/// Path that selects a private in-memory database.
const IN_MEMORY: &str = ":memory:";

/// How long a connection waits for another writer before failing.
const BUSY_TIMEOUT_MS: u64 = 5_000;

/// Database handle wrapping a libSQL database and its primary connection.
///
/// File databases hand out a fresh connection per operation, so concurrent
/// operations never share a transaction or an insert id. Every connection to
/// `":memory:"` would open its own empty database, so in-memory operations
/// share the primary connection and take turns on `memory_lock` instead.
pub struct LintDb {
    db: libsql::Database,
    conn: libsql::Connection,
    in_memory: bool,
    memory_lock: Mutex<()>,
}

/// A connection reserved for one operation.
pub(crate) struct DbSession<'a> {
    conn: libsql::Connection,
    _turn: Option<MutexGuard<'a, ()>>,
}

impl DbSession<'_> {
    pub(crate) const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Open a write transaction, taking the database write lock up front.
    pub(crate) async fn begin_write(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self
            .conn
            .transaction_with_behavior(libsql::TransactionBehavior::Immediate)
            .await?)
    }

    /// Open a read transaction over a consistent snapshot.
    pub(crate) async fn begin_read(&self) -> Result<libsql::Transaction, DatabaseError> {
        Ok(self.conn.transaction().await?)
    }
}

impl LintDb {
    /// Open a local database at the given path, or `":memory:"`.
    ///
    /// Runs migrations automatically on open.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened or
    /// migrations fail.
    pub async fn open_local(path: &str) -> Result<Self, DatabaseError> {
        let db = Builder::new_local(path).build().await?;
        let conn = db.connect()?;
        let in_memory = path == IN_MEMORY;

        configure_connection(&conn).await?;
        if !in_memory {
            // Readers keep going while one upload writes.
            let mut rows = conn
                .query("PRAGMA journal_mode = WAL", ())
                .await
                .map_err(|e| DatabaseError::Migration(format!("PRAGMA journal_mode: {e}")))?;
            while rows.next().await?.is_some() {}
        }

        let lint_db = Self {
            db,
            conn,
            in_memory,
            memory_lock: Mutex::new(()),
        };
        lint_db.run_migrations().await?;
        tracing::debug!(path, in_memory, "opened lintboard database");
        Ok(lint_db)
    }

    /// Access the primary libSQL connection for direct queries.
    #[must_use]
    pub const fn conn(&self) -> &libsql::Connection {
        &self.conn
    }

    /// Reserve a connection for one operation.
    pub(crate) async fn session(&self) -> Result<DbSession<'_>, DatabaseError> {
        if self.in_memory {
            let turn = self.memory_lock.lock().await;
            return Ok(DbSession {
                conn: self.conn.clone(),
                _turn: Some(turn),
            });
        }

        let conn = self.db.connect()?;
        configure_connection(&conn).await?;
        Ok(DbSession { conn, _turn: None })
    }
}

/// Per-connection settings: foreign keys (needed for `ON DELETE CASCADE`)
/// and the busy timeout.
async fn configure_connection(conn: &libsql::Connection) -> Result<(), DatabaseError> {
    conn.execute("PRAGMA foreign_keys = ON", ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA foreign_keys: {e}")))?;
    let mut rows = conn
        .query(&format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"), ())
        .await
        .map_err(|e| DatabaseError::Migration(format!("PRAGMA busy_timeout: {e}")))?;
    while rows.next().await?.is_some() {}
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    async fn test_db() -> LintDb {
        LintDb::open_local(":memory:").await.unwrap()
    }

    async fn count(db: &LintDb, table: &str) -> i64 {
        let mut rows = db
            .conn()
            .query(&format!("SELECT COUNT(*) FROM {table}"), ())
            .await
            .unwrap();
        rows.next().await.unwrap().unwrap().get::<i64>(0).unwrap()
    }

    #[tokio::test]
    async fn open_local_creates_schema() {
        let db = test_db().await;

        for table in ["report", "issue"] {
            let mut rows = db
                .conn()
                .query(
                    "SELECT name FROM sqlite_master WHERE type='table' AND name=?1",
                    [table],
                )
                .await
                .unwrap();
            let row = rows.next().await.unwrap();
            assert!(row.is_some(), "table '{table}' should exist");
        }
    }

    #[tokio::test]
    async fn idempotent_migrations() {
        let db = test_db().await;
        db.run_migrations().await.unwrap();
    }

    #[tokio::test]
    async fn issue_requires_existing_report() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO issue (report_id, category, severity) VALUES (999, 'Design', 'HIGH')",
                (),
            )
            .await;
        assert!(result.is_err(), "dangling report_id should be rejected");
    }

    #[tokio::test]
    async fn severity_check_constraint() {
        let db = test_db().await;
        let result = db
            .conn()
            .execute(
                "INSERT INTO issue (category, severity) VALUES ('Design', 'CRITICAL')",
                (),
            )
            .await;
        assert!(result.is_err(), "unknown severity should be rejected");
    }

    #[tokio::test]
    async fn deleting_report_cascades_to_issues() {
        let db = test_db().await;
        db.conn()
            .execute(
                "INSERT INTO report (id, tool_id, tool_name, origin_report_file) VALUES (1, 'pmd', 'PMD', 'a.xml')",
                (),
            )
            .await
            .unwrap();
        db.conn()
            .execute(
                "INSERT INTO issue (report_id, category, severity) VALUES (1, 'Design', 'HIGH'), (1, 'Design', 'LOW')",
                (),
            )
            .await
            .unwrap();
        assert_eq!(count(&db, "issue").await, 2);

        db.conn()
            .execute("DELETE FROM report WHERE id = 1", ())
            .await
            .unwrap();
        assert_eq!(count(&db, "issue").await, 0);
    }
}
