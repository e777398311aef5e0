//! The parsed-report model.
//!
//! A `Report` exclusively owns its ordered `Vec<Issue>`. There are no back
//! pointers from an issue to its report; the persisted link is a plain
//! `report_id` foreign key added by `lb-db` at mapping time.

mod issue;
mod report;

pub use issue::{Issue, IssueBuilder};
pub use report::Report;
