//! # lb-core
//!
//! Core types and error types for Lintboard.
//!
//! This crate provides the foundational types shared across all Lintboard crates:
//! - The parsed-report model (`Report` owning an ordered list of `Issue`s)
//! - Severity levels and the issue properties the dashboard groups by
//! - Cross-cutting error types
//! - JSON response shapes consumed by the dashboard charts and tables

pub mod entities;
pub mod enums;
pub mod errors;
pub mod responses;
