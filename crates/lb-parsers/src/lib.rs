//! # lb-parsers
//!
//! Parser capability and tool registry for Lintboard.
//!
//! Every supported report format implements [`Parser`]. The
//! [`ToolRegistry`] maps the tool id selected at upload time to a parser
//! factory; unknown ids are an error, never a silent fallback. The only
//! format built in is Lintboard's own JSON issue list
//! ([`native::NativeJsonParser`]); callers register others.

pub mod error;
pub mod native;
pub mod parser;
pub mod registry;

pub use error::ParserError;
pub use parser::{Parser, ParserFactory, strip_utf8_bom};
pub use registry::{AnalysisTool, ToolRegistry};
