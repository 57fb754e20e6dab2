//! Custom error types for Parley
//!
//! Provides a unified error handling system across all modules.

use thiserror::Error;

/// Main error type for Parley operations
#[derive(Error, Debug)]
pub enum ParleyError {
    /// The completion provider call itself failed (network, auth, rate limit)
    #[error("Provider error: {0}")]
    Provider(String),

    /// The provider returned a finish reason the loop does not handle
    #[error("Unexpected finish reason: '{0}'")]
    UnexpectedFinishReason(String),

    /// The tool-call argument string was not valid JSON
    #[error("Arguments for tool '{tool}' are not valid JSON: {source}")]
    ArgumentParse {
        tool: String,
        #[source]
        source: serde_json::Error,
    },

    /// The provider named a tool absent from the registry
    #[error("Unknown tool: '{0}'")]
    UnknownTool(String),

    /// A tool handler failed and chose to propagate
    #[error("Tool '{tool}' failed: {message}")]
    ToolExecution { tool: String, message: String },

    /// The conversation loop ran out of turns without a final answer
    #[error("Turn limit of {0} reached without a final answer")]
    TurnLimit(usize),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON parsing errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type for Parley operations
pub type Result<T> = std::result::Result<T, ParleyError>;

impl ParleyError {
    /// Create a provider error
    pub fn provider(msg: impl Into<String>) -> Self {
        Self::Provider(msg.into())
    }

    /// Create a tool execution error
    pub fn tool(tool: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ToolExecution {
            tool: tool.into(),
            message: msg.into(),
        }
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
