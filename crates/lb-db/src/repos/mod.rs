//! Repository modules implementing insert and select operations.
//!
//! Each module adds methods to `EntityService` via `impl EntityService` blocks.

pub mod issue;
pub mod report;
