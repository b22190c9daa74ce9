//! Turn orchestration: the tool-calling loop, its stream of events and
//! transcript helpers.

pub mod conversation;
pub mod events;
pub mod orchestrator;
pub mod prompt;
pub mod transcript;

pub use conversation::{ConversationLoop, OrchestratorResult, ToolOutcome};
pub use events::StreamEvent;
pub use orchestrator::{Orchestrator, OrchestratorBuilder, TurnRequest};
pub use prompt::build_system_prompt;
pub use transcript::{
    conversation_title, count_tool_blocks, filter_used_sources, history_from_blocks,
    text_from_blocks, StoredTurn, TranscriptBuilder,
};
