//! # lb-dashboard
//!
//! Aggregation engine and use cases behind the Lintboard dashboard.
//!
//! [`distribution::property_distribution`] and [`table::summary_table`] are
//! pure functions over reports. [`service::IssuesService`] wires them to the
//! store and the tool registry: it looks reports up by tool id and
//! reference, builds the statistics table and runs the upload flow.

pub mod distribution;
pub mod error;
pub mod service;
pub mod table;

pub use distribution::property_distribution;
pub use error::DashboardError;
pub use service::IssuesService;
pub use table::summary_table;
