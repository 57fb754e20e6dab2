//! Conversation transcript
//!
//! Append-only sequence of turns, owned by one conversation for its
//! duration and discarded when the loop exits.

use crate::core::Turn;

/// Ordered, append-only sequence of conversation turns
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    /// Create an empty transcript
    pub fn new() -> Self {
        Self { turns: Vec::new() }
    }

    /// Create a transcript seeded with one user turn
    pub fn seeded(user_text: impl Into<String>) -> Self {
        let mut transcript = Self::new();
        transcript.push(Turn::user(user_text));
        transcript
    }

    /// Append a turn
    pub fn push(&mut self, turn: Turn) {
        self.turns.push(turn);
    }

    /// Record one completed tool exchange.
    ///
    /// Appends the tool-request turn and its result turn together, so a
    /// result always immediately follows the request with the same name.
    /// The raw argument string is recorded exactly as received.
    pub fn record_tool_exchange(
        &mut self,
        tool_name: impl Into<String>,
        raw_arguments: impl Into<String>,
        result_payload: impl Into<String>,
    ) {
        let tool_name = tool_name.into();
        self.push(Turn::tool_request(tool_name.clone(), raw_arguments));
        self.push(Turn::tool_result(tool_name, result_payload));
    }

    /// Get all turns
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Get the turn count
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_transcript() {
        let transcript = Transcript::seeded("Hello");
        assert_eq!(transcript.len(), 1);
        assert_eq!(transcript.turns()[0], Turn::user("Hello"));
    }

    #[test]
    fn test_tool_exchange_keeps_adjacent_pair() {
        let mut transcript = Transcript::seeded("What's the weather?");
        transcript.record_tool_exchange(
            "get_current_weather",
            r#"{"location":"SF"}"#,
            r#"{"result":"sunny"}"#,
        );

        assert_eq!(transcript.len(), 3);
        assert_eq!(
            transcript.turns()[1],
            Turn::tool_request("get_current_weather", r#"{"location":"SF"}"#)
        );
        assert_eq!(
            transcript.turns()[2],
            Turn::tool_result("get_current_weather", r#"{"result":"sunny"}"#)
        );
    }

    #[test]
    fn test_raw_arguments_recorded_verbatim() {
        // Oddly-spaced but valid JSON must survive byte-for-byte
        let raw = "{ \"location\" :\"SF\",  \"format\":\"celsius\" }";
        let mut transcript = Transcript::new();
        transcript.record_tool_exchange("get_current_weather", raw, "{}");

        match &transcript.turns()[0] {
            Turn::AssistantToolRequest { raw_arguments, .. } => {
                assert_eq!(raw_arguments, raw);
            }
            other => panic!("expected tool request, got {:?}", other),
        }
    }
}
