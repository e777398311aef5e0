//! JSON response shapes consumed by the dashboard.
//!
//! Field order is significant: `serde_json` emits fields in declaration order
//! and the chart and table scripts compare against these exact layouts:
//!
//! ```text
//! {"labels":["Design","Code Style"],"datasets":[{"data":[15,53]}]}
//! {"data":[["pmd","PMD","pmd.xml","3","0","1","1","1"]]}
//! ```

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Issue counts grouped by one property, shaped for a chart.
///
/// `labels` and `datasets[0].data` are aligned index-for-index.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct PropertyDistribution {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// One series of counts.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct Dataset {
    pub data: Vec<usize>,
}

impl PropertyDistribution {
    /// Build from `(label, count)` entries, preserving their order.
    ///
    /// Always produces exactly one dataset, even when `entries` is empty.
    pub fn from_counts(entries: impl IntoIterator<Item = (String, usize)>) -> Self {
        let (labels, data): (Vec<String>, Vec<usize>) = entries.into_iter().unzip();
        Self {
            labels,
            datasets: vec![Dataset { data }],
        }
    }

    /// Sum of all counts in the first dataset.
    #[must_use]
    pub fn total(&self) -> usize {
        self.datasets
            .first()
            .map_or(0, |dataset| dataset.data.iter().sum())
    }
}

/// Per-report summary rows for the statistics table.
///
/// Every cell is a string, counts included.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct IssuesTable {
    pub data: Vec<Vec<String>>,
}

impl IssuesTable {
    pub fn push_row(&mut self, row: Vec<String>) {
        self.data.push(row);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
