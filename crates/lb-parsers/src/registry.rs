//! Tool registry: resolves a parser from the tool id chosen at upload time.

use std::collections::HashMap;

use serde::Serialize;

use crate::error::ParserError;
use crate::native::{NATIVE_TOOL_ID, NATIVE_TOOL_NAME, NativeJsonParser};
use crate::parser::{Parser, ParserFactory};

/// Descriptor of a registered static-analysis tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalysisTool {
    pub id: String,
    pub name: String,
}

struct RegisteredTool {
    tool: AnalysisTool,
    factory: ParserFactory,
}

/// Maps tool ids to parser factories.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, RegisteredTool>,
}

impl ToolRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the built-in native JSON format.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        registry.register(NATIVE_TOOL_ID, NATIVE_TOOL_NAME, || {
            Box::new(NativeJsonParser)
        });
        registry
    }

    /// Register (or replace) the parser for `id`.
    pub fn register<F>(&mut self, id: impl Into<String>, name: impl Into<String>, factory: F)
    where
        F: Fn() -> Box<dyn Parser> + Send + Sync + 'static,
    {
        let tool = AnalysisTool {
            id: id.into(),
            name: name.into(),
        };
        tracing::debug!(tool_id = %tool.id, tool_name = %tool.name, "registered parser");
        self.tools.insert(
            tool.id.clone(),
            RegisteredTool {
                tool,
                factory: Box::new(factory),
            },
        );
    }

    /// Descriptor of the tool registered under `id`.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::UnknownTool` if no tool has that id.
    pub fn tool(&self, id: &str) -> Result<&AnalysisTool, ParserError> {
        self.tools
            .get(id)
            .map(|registered| &registered.tool)
            .ok_or_else(|| ParserError::UnknownTool(id.to_string()))
    }

    /// Build a parser for `id`.
    ///
    /// # Errors
    ///
    /// Returns `ParserError::UnknownTool` if no tool has that id.
    pub fn resolve_parser(&self, id: &str) -> Result<Box<dyn Parser>, ParserError> {
        self.tools
            .get(id)
            .map(|registered| (registered.factory)())
            .ok_or_else(|| ParserError::UnknownTool(id.to_string()))
    }

    /// All registered tools, sorted by display name and then id.
    #[must_use]
    pub fn find_all_tools(&self) -> Vec<AnalysisTool> {
        let mut tools: Vec<AnalysisTool> = self
            .tools
            .values()
            .map(|registered| registered.tool.clone())
            .collect();
        tools.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        tools
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolRegistry")
            .field("tools", &self.find_all_tools())
            .finish()
    }
}
