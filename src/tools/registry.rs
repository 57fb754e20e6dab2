//! Tool registry - manages and dispatches tool calls
//!
//! Central hub for registering tools and routing provider tool requests to
//! handlers. Lookup by name is explicit; a name the registry does not know
//! returns `None` rather than panicking, and the declared surface is derived
//! from the registered tools so the two cannot drift apart.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::core::{Result, ToolDeclaration};

/// A named capability the completion provider may request
///
/// Implementations receive already-parsed JSON arguments and return a JSON
/// result value. A tool decides its own failure policy: it may propagate an
/// error (failing the conversation turn) or catch its own failures and
/// return a sentinel value instead.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Name the provider uses to request this tool
    fn name(&self) -> &str;

    /// Declaration exposed to the completion provider
    fn declaration(&self) -> ToolDeclaration;

    /// Invoke the tool with parsed arguments
    async fn invoke(&self, args: serde_json::Value) -> Result<serde_json::Value>;
}

/// Registry of available tools
///
/// Read-only after construction; may be shared across conversations.
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool under its own name
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        self.tools.insert(tool.name().to_string(), tool);
    }

    /// Look up a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// Get declarations for all registered tools
    pub fn declarations(&self) -> Vec<ToolDeclaration> {
        self.tools.values().map(|tool| tool.declaration()).collect()
    }

    /// Get the number of registered tools
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Check if the registry is empty
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
