//! Conversation loop state
//!
//! Tracks the two-phase state of the loop and guards against runaway
//! tool-call cycles with a turn limit.

/// Phase of the conversation loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    /// Waiting on the next provider turn
    AwaitingProvider,
    /// A final answer has been produced
    Done,
}

/// State of one conversation loop run
#[derive(Debug, Clone)]
pub struct LoopState {
    /// Current phase
    pub phase: LoopPhase,
    /// Provider round-trips completed so far
    pub turn: usize,
    /// Maximum allowed provider round-trips
    pub max_turns: usize,
    /// Tool invocations performed so far
    pub tool_invocations: usize,
    /// Final answer once the provider signals `stop`
    pub final_answer: Option<String>,
}

impl LoopState {
    /// Create a new loop state with the given turn limit
    pub fn new(max_turns: usize) -> Self {
        Self {
            phase: LoopPhase::AwaitingProvider,
            turn: 0,
            max_turns,
            tool_invocations: 0,
            final_answer: None,
        }
    }

    /// Check if the loop should query the provider again
    pub fn should_continue(&self) -> bool {
        self.phase == LoopPhase::AwaitingProvider && self.turn < self.max_turns
    }

    /// Check if the turn limit stopped the loop before a final answer
    pub fn hit_turn_limit(&self) -> bool {
        self.phase == LoopPhase::AwaitingProvider && self.turn >= self.max_turns
    }

    /// Record one provider round-trip
    pub fn next_turn(&mut self) {
        self.turn += 1;
    }

    /// Record one tool invocation
    pub fn record_invocation(&mut self) {
        self.tool_invocations += 1;
    }

    /// Mark the loop finished with a final answer
    pub fn finish(&mut self, answer: impl Into<String>) {
        self.final_answer = Some(answer.into());
        self.phase = LoopPhase::Done;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loop_state_new() {
        let state = LoopState::new(10);
        assert_eq!(state.phase, LoopPhase::AwaitingProvider);
        assert_eq!(state.turn, 0);
        assert_eq!(state.tool_invocations, 0);
        assert!(state.final_answer.is_none());
        assert!(state.should_continue());
    }

    #[test]
    fn test_turn_limit() {
        let mut state = LoopState::new(2);
        state.next_turn();
        assert!(state.should_continue());
        assert!(!state.hit_turn_limit());

        state.next_turn();
        assert!(!state.should_continue());
        assert!(state.hit_turn_limit());
    }

    #[test]
    fn test_finish_stops_the_loop() {
        let mut state = LoopState::new(10);
        state.finish("It's sunny.");

        assert_eq!(state.phase, LoopPhase::Done);
        assert!(!state.should_continue());
        assert!(!state.hit_turn_limit());
        assert_eq!(state.final_answer.as_deref(), Some("It's sunny."));
    }
}
