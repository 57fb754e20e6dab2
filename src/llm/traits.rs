//! Completion provider trait for abstracting different backends
//!
//! Enables swapping the OpenAI-compatible HTTP client for a scripted
//! provider in tests, or for other chat-completion backends.

use async_trait::async_trait;

use crate::core::{ProviderTurn, Result, ToolDeclaration, Turn};

/// Trait for completion providers
///
/// Given a transcript and the declared tool surface, a provider returns one
/// assistant turn: either a final answer (`stop`) or a tool request
/// (`function_call`). Sampling is pinned to temperature 0 so tool selection
/// stays reproducible.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Request the next assistant turn for the given transcript
    async fn complete(&self, transcript: &[Turn], tools: &[ToolDeclaration])
        -> Result<ProviderTurn>;

    /// Get the provider name
    fn name(&self) -> &str;
}
