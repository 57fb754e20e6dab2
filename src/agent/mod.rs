//! Agent module - the conversation loop and its transcript
//!
//! Contains the loop that coordinates provider calls and tool execution.

pub mod loop_state;
pub mod session;
pub mod transcript;

pub use loop_state::{LoopPhase, LoopState};
pub use session::{Session, SessionOutcome, DEFAULT_MAX_TURNS};
pub use transcript::Transcript;
