//! LLM module - completion provider integrations
//!
//! Provides the provider abstraction with an OpenAI-compatible implementation.

pub mod openai;
pub mod traits;

pub use openai::OpenAiProvider;
pub use traits::CompletionProvider;
