//! Streaming turn events.

use serde::{Deserialize, Serialize};

use crate::error::{AgentError, ErrorCategory};
use crate::types::{ChartData, UsageStats};

/// One event of a streamed turn. A stream ends with exactly one `done` or
/// `error` event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamEvent {
    ToolStart {
        tool_call_id: String,
        tool_name: String,
        description: String,
    },
    ToolEnd {
        tool_call_id: String,
        tool_name: String,
        description: String,
        success: bool,
        /// Text fed back to the model for this call.
        result: String,
    },
    Content {
        content: String,
    },
    Thinking {
        thinking: String,
    },
    Chart {
        chart: ChartData,
    },
    /// Usage reported by one LLM round.
    Usage {
        usage: UsageStats,
    },
    Error {
        code: ErrorCategory,
        message: String,
    },
    /// Turn finished; carries the accumulated usage.
    Done {
        usage: UsageStats,
    },
}

impl StreamEvent {
    pub fn error(err: &AgentError) -> Self {
        Self::Error {
            code: err.category(),
            message: err.to_string(),
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done { .. } | Self::Error { .. })
    }
}
