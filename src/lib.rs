//! Parley - Chat-Completion Conversation Loop
//!
//! A small agent loop over a chat-completion API with function calling:
//! query the provider, dispatch requested tool calls to local handlers,
//! feed results back into the transcript, and repeat until the provider
//! produces a final answer.
//!
//! # Architecture
//!
//! - **Core**: Shared types, configuration, and error handling
//! - **LLM**: Completion provider abstraction with an OpenAI-compatible client
//! - **Tools**: Tool trait, registry, and the sample weather tool
//! - **Agent**: Transcript, loop state, and the conversation loop
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use parley::{Config, OpenAiProvider, Session, ToolRegistry, Transcript, WeatherTool};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load();
//!     let provider = Arc::new(OpenAiProvider::from_config(&config)?);
//!
//!     let mut registry = ToolRegistry::new();
//!     registry.register(Arc::new(WeatherTool::from_config(&config)));
//!
//!     let session = Session::from_config(&config, provider, Arc::new(registry));
//!     let mut transcript = Transcript::seeded("What is the weather like in San Francisco?");
//!
//!     let outcome = session.run(&mut transcript).await?;
//!     println!("{}", outcome.final_text);
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod core;
pub mod llm;
pub mod tools;

// Re-export commonly used items
pub use agent::{Session, SessionOutcome, Transcript};
pub use crate::core::{Config, ParleyError, Result};
pub use llm::{CompletionProvider, OpenAiProvider};
pub use tools::{Tool, ToolRegistry, WeatherTool};
