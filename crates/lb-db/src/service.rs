//! Persistence service: the single point of access to the report store.
//!
//! `EntityService` wraps `LintDb`. Repository methods are implemented as
//! `impl EntityService` blocks in [`crate::repos`].

use crate::error::DatabaseError;
use crate::{DbSession, LintDb};

/// Stores and loads reports and issues.
///
/// Every public operation follows this protocol:
/// 1. Reserve a connection of its own
/// 2. Begin transaction
/// 3. Map model to entities (writes) and execute SQL
/// 4. Commit, or roll back and return the error
/// 5. Map entities back to the model
///
/// The service is `Send + Sync`; share it behind an `Arc` to run uploads
/// concurrently.
pub struct EntityService {
    db: LintDb,
}

impl EntityService {
    /// Create a new service over a local database.
    ///
    /// # Arguments
    ///
    /// * `db_path` - Path to the libSQL database file, or `":memory:"` for tests.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseError` if the database cannot be opened.
    pub async fn new_local(db_path: &str) -> Result<Self, DatabaseError> {
        let db = LintDb::open_local(db_path).await?;
        Ok(Self { db })
    }

    /// Create from an existing `LintDb`.
    #[must_use]
    pub const fn from_db(db: LintDb) -> Self {
        Self { db }
    }

    /// Access the underlying database handle.
    #[must_use]
    pub const fn db(&self) -> &LintDb {
        &self.db
    }

    /// Reserve a connection for one operation.
    pub(crate) async fn session(&self) -> Result<DbSession<'_>, DatabaseError> {
        self.db.session().await
    }
}

/// Commit `tx` if `result` is `Ok`, otherwise roll it back and return the
/// original error.
///
/// A failed rollback is logged; the operation's own error is what the caller
/// sees.
pub(crate) async fn finish<T>(
    tx: libsql::Transaction,
    result: Result<T, DatabaseError>,
) -> Result<T, DatabaseError> {
    match result {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(error) => {
            if let Err(rollback_error) = tx.rollback().await {
                tracing::warn!(%error, %rollback_error, "transaction rollback failed");
            }
            Err(error)
        }
    }
}
