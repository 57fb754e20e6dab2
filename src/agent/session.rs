//! Conversation loop
//!
//! Owns one transcript for the duration of a run, repeatedly asks the
//! completion provider for the next turn, and dispatches requested tool
//! calls until the provider signals a final answer.

use std::sync::Arc;

use crate::agent::loop_state::LoopState;
use crate::agent::transcript::Transcript;
use crate::core::{Config, FinishReason, ParleyError, Result, ToolRequest, Turn};
use crate::llm::CompletionProvider;
use crate::tools::ToolRegistry;

/// Default provider round-trip limit
pub const DEFAULT_MAX_TURNS: usize = 10;

/// Outcome of a completed conversation
#[derive(Debug, Clone)]
pub struct SessionOutcome {
    /// The assistant's final answer
    pub final_text: String,
    /// Provider round-trips performed
    pub turns: usize,
    /// Tool invocations performed
    pub tool_invocations: usize,
}

/// Drives one conversation at a time against a provider and a tool registry
///
/// The registry is read-only and may be shared; each conversation gets its
/// own transcript, threaded through [`Session::run`] explicitly.
pub struct Session {
    provider: Arc<dyn CompletionProvider>,
    tools: Arc<ToolRegistry>,
    max_turns: usize,
    debug: bool,
}

impl Session {
    /// Create a session with the default turn limit
    pub fn new(provider: Arc<dyn CompletionProvider>, tools: Arc<ToolRegistry>) -> Self {
        Self {
            provider,
            tools,
            max_turns: DEFAULT_MAX_TURNS,
            debug: false,
        }
    }

    /// Create a session using limits from configuration
    pub fn from_config(
        config: &Config,
        provider: Arc<dyn CompletionProvider>,
        tools: Arc<ToolRegistry>,
    ) -> Self {
        Self {
            provider,
            tools,
            max_turns: config.session.max_turns,
            debug: config.session.debug,
        }
    }

    /// Override the turn limit
    pub fn with_max_turns(mut self, max_turns: usize) -> Self {
        self.max_turns = max_turns;
        self
    }

    /// Run the conversation to completion.
    ///
    /// Each iteration performs one provider round-trip and, when the
    /// provider requests a tool, exactly one tool invocation. The request
    /// turn (raw arguments verbatim) and the result turn are appended
    /// together before the provider is queried again. All loop-level
    /// failures are fatal to the conversation and leave the transcript
    /// untouched since its last successful append.
    pub async fn run(&self, transcript: &mut Transcript) -> Result<SessionOutcome> {
        let declarations = self.tools.declarations();
        let mut state = LoopState::new(self.max_turns);

        while state.should_continue() {
            let provider_turn = self
                .provider
                .complete(transcript.turns(), &declarations)
                .await?;
            state.next_turn();

            match provider_turn.finish_reason {
                FinishReason::Stop => {
                    let text = provider_turn.content.unwrap_or_default();
                    transcript.push(Turn::assistant_final(text.clone()));
                    state.finish(text);
                }
                FinishReason::FunctionCall => {
                    let request = provider_turn.tool_request.unwrap_or_else(|| ToolRequest {
                        name: String::new(),
                        raw_arguments: "{}".to_string(),
                    });
                    self.dispatch_tool(transcript, &mut state, request).await?;
                }
                FinishReason::Other(reason) => {
                    return Err(ParleyError::UnexpectedFinishReason(reason));
                }
            }
        }

        if state.hit_turn_limit() {
            return Err(ParleyError::TurnLimit(self.max_turns));
        }

        Ok(SessionOutcome {
            final_text: state.final_answer.unwrap_or_default(),
            turns: state.turn,
            tool_invocations: state.tool_invocations,
        })
    }

    /// Parse, look up, and invoke one requested tool, then record the
    /// exchange on the transcript.
    async fn dispatch_tool(
        &self,
        transcript: &mut Transcript,
        state: &mut LoopState,
        request: ToolRequest,
    ) -> Result<()> {
        // Arguments must parse before any handler is consulted
        let parsed: serde_json::Value =
            serde_json::from_str(&request.raw_arguments).map_err(|e| {
                ParleyError::ArgumentParse {
                    tool: request.name.clone(),
                    source: e,
                }
            })?;

        let tool = self
            .tools
            .get(&request.name)
            .ok_or_else(|| ParleyError::UnknownTool(request.name.clone()))?;

        println!(
            "Function call: {}, arguments: {}",
            request.name, request.raw_arguments
        );

        let result = tool.invoke(parsed).await?;
        state.record_invocation();

        let payload = serde_json::to_string(&serde_json::json!({ "result": result }))?;

        println!("Function {} result: {}", request.name, payload);
        if self.debug {
            eprintln!(
                "DEBUG: turn {}/{}, {} invocation(s) so far",
                state.turn, state.max_turns, state.tool_invocations
            );
        }

        transcript.record_tool_exchange(&request.name, request.raw_arguments, payload);
        Ok(())
    }
}
