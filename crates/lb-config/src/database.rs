//! libSQL database configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Path of the in-memory database accepted by libSQL.
pub const IN_MEMORY: &str = ":memory:";

fn default_path() -> String {
    String::from("lintboard.db")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DatabaseConfig {
    /// Path to the local database file, or `":memory:"`.
    #[serde(default = "default_path")]
    pub path: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
        }
    }
}

impl DatabaseConfig {
    /// Whether the database lives only for the lifetime of the process.
    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY
    }

    /// Reject an empty path.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` when `path` is blank.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}
