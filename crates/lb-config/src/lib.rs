//! # lb-config
//!
//! Layered configuration loading for Lintboard using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`LINTBOARD_*` prefix, `__` as separator)
//! 2. Project-level `.lintboard/config.toml`
//! 3. User-level `~/.config/lintboard/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `LINTBOARD_DATABASE__PATH` -> `database.path`,
//! `LINTBOARD_GENERAL__DEFAULT_PROPERTY` -> `general.default_property`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use lb_config::LintboardConfig;
//!
//! let config = LintboardConfig::load_with_dotenv().expect("config");
//! println!("database: {}", config.database.path);
//! ```

mod database;
mod error;
mod general;
mod upload;

pub use database::{DatabaseConfig, IN_MEMORY};
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use upload::UploadConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Environment variable prefix for every setting.
pub const ENV_PREFIX: &str = "LINTBOARD_";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct LintboardConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

impl LintboardConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` loading.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a source cannot be parsed or a value is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// Same as [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the provider chain: defaults, then every file from
    /// [`Self::config_files`] that exists, then `LINTBOARD_*` variables.
    ///
    /// # Errors
    ///
    /// Building never fails. Missing files are skipped; a malformed file or
    /// variable surfaces when the chain is extracted, which [`Self::load`]
    /// reports as `ConfigError::Figment`.
    #[must_use]
    pub fn figment() -> Figment {
        Self::config_files()
            .into_iter()
            .filter(|path| path.exists())
            .fold(
                Figment::from(Serialized::defaults(Self::default())),
                |figment, path| figment.merge(Toml::file(path)),
            )
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Candidate TOML files, lowest priority first: the user-level
    /// `lintboard/config.toml` under the platform config directory, then the
    /// project-level `.lintboard/config.toml` relative to the working
    /// directory. The user-level entry is absent when the platform has no
    /// config directory.
    #[must_use]
    pub fn config_files() -> Vec<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("lintboard").join("config.toml"))
            .into_iter()
            .chain(std::iter::once(
                PathBuf::from(".lintboard").join("config.toml"),
            ))
            .collect()
    }

    /// Check cross-field constraints after extraction.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.database.validate()?;
        self.general.default_property()?;
        Ok(())
    }

    /// Load the nearest `.env` in this crate's manifest directory or its
    /// two parents (the workspace root), else the one found from the working
    /// directory.
    ///
    /// # Errors
    ///
    /// Never fails: a missing or unreadable `.env` leaves the environment as
    /// it was, and variables that are already set are not overwritten.
    fn load_dotenv_from_workspace() {
        let beside_manifest = std::env::var_os("CARGO_MANIFEST_DIR").and_then(|dir| {
            PathBuf::from(dir)
                .ancestors()
                .take(3)
                .map(|dir| dir.join(".env"))
                .find(|path| path.exists())
        });

        let _ = match beside_manifest {
            Some(path) => dotenvy::from_path(path),
            None => dotenvy::dotenv().map(drop),
        };
    }
}
