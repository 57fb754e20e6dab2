//! Shared types used across Parley modules
//!
//! Contains transcript turns, tool declarations, and the provider response
//! shape consumed by the conversation loop.

use serde::{Deserialize, Serialize};

/// A single turn in a conversation transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Turn {
    /// A message from the user
    User { text: String },
    /// The assistant's final textual answer; ends the conversation
    AssistantFinal { text: String },
    /// The assistant requesting a tool invocation.
    ///
    /// `raw_arguments` is the JSON-encoded argument string exactly as the
    /// provider sent it. It is parsed before dispatch but recorded verbatim.
    AssistantToolRequest {
        tool_name: String,
        raw_arguments: String,
    },
    /// The result of a tool invocation, fed back to the provider.
    ///
    /// `payload` is the JSON encoding of `{"result": <value>}`.
    ToolResult { tool_name: String, payload: String },
}

impl Turn {
    /// Create a user turn
    pub fn user(text: impl Into<String>) -> Self {
        Self::User { text: text.into() }
    }

    /// Create a final assistant turn
    pub fn assistant_final(text: impl Into<String>) -> Self {
        Self::AssistantFinal { text: text.into() }
    }

    /// Create a tool-request turn
    pub fn tool_request(tool_name: impl Into<String>, raw_arguments: impl Into<String>) -> Self {
        Self::AssistantToolRequest {
            tool_name: tool_name.into(),
            raw_arguments: raw_arguments.into(),
        }
    }

    /// Create a tool-result turn
    pub fn tool_result(tool_name: impl Into<String>, payload: impl Into<String>) -> Self {
        Self::ToolResult {
            tool_name: tool_name.into(),
            payload: payload.into(),
        }
    }
}

/// Declaration of a tool exposed to the completion provider
///
/// `parameters` is a JSON-Schema-shaped object
/// (`{"type": "object", "properties": {...}, "required": [...]}`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDeclaration {
    /// Name of the tool
    pub name: String,
    /// Description of what the tool does
    pub description: String,
    /// JSON Schema for the parameters
    pub parameters: serde_json::Value,
}

impl ToolDeclaration {
    /// Create a new tool declaration
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        parameters: serde_json::Value,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            parameters,
        }
    }
}

/// Why the provider ended a turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FinishReason {
    /// The assistant produced a final answer
    Stop,
    /// The assistant requested a tool invocation
    FunctionCall,
    /// Anything else; the loop treats this as an error
    Other(String),
}

impl FinishReason {
    /// Map the provider's finish-reason string onto the known variants
    pub fn from_wire(reason: &str) -> Self {
        match reason {
            "stop" => Self::Stop,
            "function_call" => Self::FunctionCall,
            other => Self::Other(other.to_string()),
        }
    }
}

impl std::fmt::Display for FinishReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FinishReason::Stop => write!(f, "stop"),
            FinishReason::FunctionCall => write!(f, "function_call"),
            FinishReason::Other(s) => write!(f, "{}", s),
        }
    }
}

/// A tool invocation requested by the provider
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolRequest {
    /// Name of the tool to invoke; empty when the provider omitted it
    pub name: String,
    /// JSON-encoded argument string, exactly as received
    pub raw_arguments: String,
}

/// One assistant turn as returned by a completion provider
#[derive(Debug, Clone)]
pub struct ProviderTurn {
    /// The provider's reason for ending the turn
    pub finish_reason: FinishReason,
    /// Text content, present on `stop` turns
    pub content: Option<String>,
    /// Requested tool invocation, present on `function_call` turns
    pub tool_request: Option<ToolRequest>,
}

impl ProviderTurn {
    /// A final-answer turn
    pub fn stop(content: impl Into<String>) -> Self {
        Self {
            finish_reason: FinishReason::Stop,
            content: Some(content.into()),
            tool_request: None,
        }
    }

    /// A tool-request turn
    pub fn function_call(name: impl Into<String>, raw_arguments: impl Into<String>) -> Self {
        Self {
            finish_reason: FinishReason::FunctionCall,
            content: None,
            tool_request: Some(ToolRequest {
                name: name.into(),
                raw_arguments: raw_arguments.into(),
            }),
        }
    }
}
