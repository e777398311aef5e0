//! Severity levels and groupable issue properties.
//!
//! `Severity` serializes to the upper-case names stored in the `issue.severity`
//! column (`ERROR`, `HIGH`, `NORMAL`, `LOW`). `IssueProperty` uses `snake_case`
//! like every other selector enum exposed to the CLI.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::Issue;
use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

/// Severity of a single finding.
///
/// Ordered from most to least severe:
///
/// ```text
/// ERROR > HIGH > NORMAL > LOW
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, JsonSchema)]
pub enum Severity {
    #[serde(rename = "ERROR")]
    Error,
    #[serde(rename = "HIGH")]
    WarningHigh,
    #[default]
    #[serde(rename = "NORMAL")]
    WarningNormal,
    #[serde(rename = "LOW")]
    WarningLow,
}

impl Severity {
    /// All levels, most severe first. Matches the column order of the
    /// statistics table.
    pub const ALL: [Self; 4] = [
        Self::Error,
        Self::WarningHigh,
        Self::WarningNormal,
        Self::WarningLow,
    ];

    /// Return the string representation used in SQL storage.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Error => "ERROR",
            Self::WarningHigh => "HIGH",
            Self::WarningNormal => "NORMAL",
            Self::WarningLow => "LOW",
        }
    }

    /// Numeric rank, higher is more severe.
    #[must_use]
    pub const fn level(self) -> u8 {
        match self {
            Self::Error => 4,
            Self::WarningHigh => 3,
            Self::WarningNormal => 2,
            Self::WarningLow => 1,
        }
    }
}

impl PartialOrd for Severity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Severity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.level().cmp(&other.level())
    }
}

impl FromStr for Severity {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|severity| severity.as_str() == s)
            .ok_or_else(|| CoreError::InvalidSeverity(s.to_string()))
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// IssueProperty
// ---------------------------------------------------------------------------

/// A string-valued issue attribute that distributions can be grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum IssueProperty {
    Category,
    Type,
    Severity,
    FileName,
    PackageName,
    ModuleName,
    Origin,
}

impl IssueProperty {
    pub const ALL: [Self; 7] = [
        Self::Category,
        Self::Type,
        Self::Severity,
        Self::FileName,
        Self::PackageName,
        Self::ModuleName,
        Self::Origin,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Category => "category",
            Self::Type => "type",
            Self::Severity => "severity",
            Self::FileName => "file_name",
            Self::PackageName => "package_name",
            Self::ModuleName => "module_name",
            Self::Origin => "origin",
        }
    }

    /// Read this property from an issue.
    #[must_use]
    pub fn extract(self, issue: &Issue) -> &str {
        match self {
            Self::Category => &issue.category,
            Self::Type => &issue.issue_type,
            Self::Severity => issue.severity.as_str(),
            Self::FileName => &issue.file_name,
            Self::PackageName => &issue.package_name,
            Self::ModuleName => &issue.module_name,
            Self::Origin => &issue.origin,
        }
    }
}

impl FromStr for IssueProperty {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|property| property.as_str() == normalized)
            .ok_or_else(|| CoreError::UnknownProperty(s.to_string()))
    }
}

impl fmt::Display for IssueProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
